//! Configuration for selector generation

use regex::Regex;

/// Selector kinds a single element can be addressed by.
///
/// The order of a caller-supplied sequence is the search priority; a kind
/// absent from the sequence is never attempted. Duplicates are not
/// deduplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectorKind {
    Id,
    Class,
    Tag,
    NthChild,
    Attributes,
    Name,
    Href,
}

/// Options for [`unique_selector`](crate::unique_selector)
#[derive(Debug, Clone)]
pub struct Options {
    /// Kinds to attempt per ancestor level, in priority order
    pub selector_types: Vec<SelectorKind>,

    /// Attribute names excluded from the Attributes candidate list
    pub attributes_to_ignore: Vec<String>,

    /// Id and class fragments matching this pattern are dropped before the
    /// search begins
    pub exclude_regex: Option<Regex>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            selector_types: vec![
                SelectorKind::Id,
                SelectorKind::Class,
                SelectorKind::Tag,
                SelectorKind::Name,
                SelectorKind::Href,
                SelectorKind::NthChild,
            ],
            attributes_to_ignore: vec![
                "id".to_string(),
                "class".to_string(),
                "length".to_string(),
            ],
            exclude_regex: None,
        }
    }
}
