//! Per-level fragment resolution
//!
//! For one element, tries the configured selector kinds strictly in order
//! and returns the first fragment that is unique within the element's
//! parent. Multi-valued kinds (classes, attributes) search bounded
//! combinations; `*` is the unconditional floor when everything misses.

use dom::{DomArena, NodeId, Result};
use regex::Regex;
use tracing::debug;

use crate::combinations::combinations;
use crate::extract;
use crate::options::SelectorKind;
use crate::uniqueness::matches_exactly_one;

/// Combination size cap. Keeps the candidate search combinatorial in name
/// only; three fragments distinguish anything realistic and the cost of a
/// larger bound grows as C(n, k).
pub(crate) const MAX_COMBINATION_SIZE: usize = 3;

/// Every candidate fragment one element offers, built once per level and
/// read-only afterwards except for the exclusion filter.
#[derive(Debug, Default)]
pub struct ElementSelectors {
    pub id: Option<String>,
    pub tag: Option<String>,
    pub name: Option<String>,
    pub href: Option<String>,
    pub nth_child: Option<String>,
    pub classes: Vec<String>,
    pub attributes: Vec<String>,
}

impl ElementSelectors {
    /// Extract candidates for every kind the caller asked for. Kinds not
    /// in `kinds` stay empty and are never attempted.
    pub fn collect(
        arena: &DomArena,
        node_id: NodeId,
        kinds: &[SelectorKind],
        attributes_to_ignore: &[String],
    ) -> Result<Self> {
        let node = arena.get(node_id)?;
        let mut selectors = Self::default();

        for kind in kinds {
            match kind {
                SelectorKind::Id => selectors.id = extract::id_selector(node),
                SelectorKind::Tag => selectors.tag = extract::tag_selector(node),
                SelectorKind::Name => selectors.name = extract::name_selector(node),
                SelectorKind::Href => selectors.href = extract::href_selector(node),
                SelectorKind::NthChild => {
                    selectors.nth_child = extract::nth_child_selector(arena, node_id)?;
                }
                SelectorKind::Class => selectors.classes = extract::class_selectors(node),
                SelectorKind::Attributes => {
                    selectors.attributes =
                        extract::attribute_selectors(node, attributes_to_ignore);
                }
            }
        }

        Ok(selectors)
    }

    /// Drop id and class fragments matching the exclusion pattern.
    ///
    /// Only those two kinds are filtered; generated/volatile values show up
    /// as ids and classes in practice.
    pub fn apply_exclusions(&mut self, pattern: &Regex) {
        if self.id.as_deref().is_some_and(|id| pattern.is_match(id)) {
            self.id = None;
        }
        self.classes.retain(|class| !pattern.is_match(class));
    }
}

/// Resolve one fragment for `node_id`, trying `kinds` in order.
///
/// Never fails to produce a fragment: `*` is returned when no kind yields
/// a usable selector.
pub fn resolve(
    arena: &DomArena,
    node_id: NodeId,
    kinds: &[SelectorKind],
    candidates: &ElementSelectors,
) -> Result<String> {
    let parent = arena.get(node_id)?.parent_id;

    for kind in kinds {
        let found = match kind {
            SelectorKind::Id => try_single(arena, node_id, parent, candidates.id.as_deref()),
            SelectorKind::Tag => try_single(arena, node_id, parent, candidates.tag.as_deref()),
            SelectorKind::Name => try_single(arena, node_id, parent, candidates.name.as_deref()),
            SelectorKind::Href => try_single(arena, node_id, parent, candidates.href.as_deref()),
            SelectorKind::Class => unique_combination(
                arena,
                node_id,
                parent,
                &candidates.classes,
                candidates.tag.as_deref(),
            ),
            SelectorKind::Attributes => unique_combination(
                arena,
                node_id,
                parent,
                &candidates.attributes,
                candidates.tag.as_deref(),
            ),
            // Always exactly one of its element siblings by construction,
            // so no uniqueness test
            SelectorKind::NthChild => candidates.nth_child.clone(),
        };

        if let Some(fragment) = found {
            debug!(fragment = %fragment, kind = ?kind, "resolved level fragment");
            return Ok(fragment);
        }
    }

    Ok("*".to_string())
}

fn locally_unique(
    arena: &DomArena,
    parent: Option<NodeId>,
    selector: &str,
    target: NodeId,
) -> bool {
    parent.is_some_and(|scope| matches_exactly_one(arena, scope, selector, target))
}

fn try_single(
    arena: &DomArena,
    node_id: NodeId,
    parent: Option<NodeId>,
    fragment: Option<&str>,
) -> Option<String> {
    fragment
        .filter(|fragment| locally_unique(arena, parent, fragment, node_id))
        .map(str::to_string)
}

/// Search combinations of the candidate list for a locally unique fragment.
///
/// Misses trigger a second pass over the same combinations with the tag
/// fragment prefixed, breaking ties against same-class siblings of a
/// different tag.
fn unique_combination(
    arena: &DomArena,
    node_id: NodeId,
    parent: Option<NodeId>,
    items: &[String],
    tag: Option<&str>,
) -> Option<String> {
    if items.is_empty() {
        return None;
    }

    let candidates = combinations(items, MAX_COMBINATION_SIZE);

    if let Some(hit) = candidates
        .iter()
        .find(|candidate| locally_unique(arena, parent, candidate, node_id))
    {
        return Some(hit.clone());
    }

    let tag = tag?;
    candidates
        .iter()
        .map(|candidate| format!("{tag}{candidate}"))
        .find(|candidate| locally_unique(arena, parent, candidate, node_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::parse_document;
    use serde_json::json;

    fn kinds_default() -> Vec<SelectorKind> {
        crate::Options::default().selector_types
    }

    fn resolve_target(arena: &DomArena, kinds: &[SelectorKind]) -> String {
        let target = arena
            .find_one(|n| n.attr("data-test") == Some("target"))
            .unwrap();
        let candidates =
            ElementSelectors::collect(arena, target, kinds, &["id".to_string(), "class".to_string(), "length".to_string(), "data-test".to_string()])
                .unwrap();
        resolve(arena, target, kinds, &candidates).unwrap()
    }

    #[test]
    fn test_id_wins_when_locally_unique() {
        let arena = parse_document(&json!({
            "nodeType": 9,
            "nodeName": "#document",
            "children": [{
                "nodeType": 1,
                "nodeName": "BODY",
                "children": [
                    {"nodeType": 1, "nodeName": "DIV", "attributes": {"id": "hero", "class": "card", "data-test": "target"}},
                    {"nodeType": 1, "nodeName": "DIV", "attributes": {"class": "card"}}
                ]
            }]
        }))
        .unwrap();

        assert_eq!(resolve_target(&arena, &kinds_default()), "#hero");
    }

    #[test]
    fn test_classes_beat_tag_order() {
        let arena = parse_document(&json!({
            "nodeType": 9,
            "nodeName": "#document",
            "children": [{
                "nodeType": 1,
                "nodeName": "BODY",
                "children": [
                    {"nodeType": 1, "nodeName": "DIV", "attributes": {"class": "a b", "data-test": "target"}},
                    {"nodeType": 1, "nodeName": "DIV", "attributes": {"class": "a"}}
                ]
            }]
        }))
        .unwrap();

        // `.a` collides, `.b` is the first unique combination
        assert_eq!(resolve_target(&arena, &kinds_default()), ".b");
    }

    #[test]
    fn test_tag_qualified_retry() {
        let arena = parse_document(&json!({
            "nodeType": 9,
            "nodeName": "#document",
            "children": [{
                "nodeType": 1,
                "nodeName": "BODY",
                "children": [
                    {"nodeType": 1, "nodeName": "SPAN", "attributes": {"class": "x", "data-test": "target"}},
                    {"nodeType": 1, "nodeName": "B", "attributes": {"class": "x"}}
                ]
            }]
        }))
        .unwrap();

        // `.x` collides across tags; the tag-prefixed second pass resolves it
        assert_eq!(resolve_target(&arena, &kinds_default()), "span.x");
    }

    #[test]
    fn test_tag_retry_needs_tag_kind() {
        let arena = parse_document(&json!({
            "nodeType": 9,
            "nodeName": "#document",
            "children": [{
                "nodeType": 1,
                "nodeName": "BODY",
                "children": [
                    {"nodeType": 1, "nodeName": "SPAN", "attributes": {"class": "x", "data-test": "target"}},
                    {"nodeType": 1, "nodeName": "B", "attributes": {"class": "x"}}
                ]
            }]
        }))
        .unwrap();

        // Without Tag in the priority list there is no qualifying prefix,
        // so resolution falls through to the ordinal
        let kinds = vec![
            SelectorKind::Id,
            SelectorKind::Class,
            SelectorKind::NthChild,
        ];
        assert_eq!(resolve_target(&arena, &kinds), ":nth-child(1)");
    }

    #[test]
    fn test_attribute_combination() {
        let arena = parse_document(&json!({
            "nodeType": 9,
            "nodeName": "#document",
            "children": [{
                "nodeType": 1,
                "nodeName": "BODY",
                "children": [
                    {"nodeType": 1, "nodeName": "INPUT", "attributes": {"type": "text", "placeholder": "Search", "data-test": "target"}},
                    {"nodeType": 1, "nodeName": "INPUT", "attributes": {"type": "text"}}
                ]
            }]
        }))
        .unwrap();

        let kinds = vec![SelectorKind::Attributes, SelectorKind::NthChild];
        assert_eq!(
            resolve_target(&arena, &kinds),
            "[placeholder=\"Search\"]"
        );
    }

    #[test]
    fn test_exclusion_drops_matching_id_before_search() {
        let arena = parse_document(&json!({
            "nodeType": 9,
            "nodeName": "#document",
            "children": [{
                "nodeType": 1,
                "nodeName": "BODY",
                "children": [
                    {"nodeType": 1, "nodeName": "DIV", "attributes": {"id": "ember-382", "class": "stable", "data-test": "target"}}
                ]
            }]
        }))
        .unwrap();

        let target = arena
            .find_one(|n| n.attr("data-test") == Some("target"))
            .unwrap();
        let kinds = kinds_default();
        let mut candidates = ElementSelectors::collect(
            &arena,
            target,
            &kinds,
            &["id".to_string(), "class".to_string(), "length".to_string(), "data-test".to_string()],
        )
        .unwrap();
        candidates.apply_exclusions(&Regex::new(r"ember-\d+").unwrap());

        assert_eq!(candidates.id, None);
        assert_eq!(
            resolve(&arena, target, &kinds, &candidates).unwrap(),
            ".stable"
        );
    }

    #[test]
    fn test_exclusion_filters_class_list() {
        let mut candidates = ElementSelectors {
            classes: vec![".stable".to_string(), ".css-1q2w3e".to_string()],
            ..Default::default()
        };
        candidates.apply_exclusions(&Regex::new(r"css-\w+").unwrap());
        assert_eq!(candidates.classes, vec![".stable"]);
    }

    #[test]
    fn test_wildcard_floor_for_detached_node() {
        let arena = parse_document(&json!({
            "nodeType": 1,
            "nodeName": "DIV",
            "attributes": {"id": "alone", "data-test": "target"}
        }))
        .unwrap();

        // A parentless element has no scope to be unique in and no ordinal
        assert_eq!(resolve_target(&arena, &kinds_default()), "*");
    }
}
