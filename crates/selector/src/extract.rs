//! Per-kind candidate extraction
//!
//! Every function here returns complete, already-escaped selector fragments
//! (`#id`, `.class`, `[attr="v"]`, `tag`, `:nth-child(n)`) that are
//! independently parseable. The search layers never see raw attribute
//! values and never produce escaping of their own.

use dom::{DomArena, DomNode, NodeId, Result};

/// Escape a raw value into a CSS identifier, per the CSS.escape algorithm
pub fn css_escape(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len());

    for (index, &c) in chars.iter().enumerate() {
        let code = c as u32;

        if code == 0 {
            out.push('\u{FFFD}');
        } else if (0x01..=0x1F).contains(&code) || code == 0x7F {
            out.push_str(&format!("\\{code:x} "));
        } else if index == 0 && c.is_ascii_digit() {
            out.push_str(&format!("\\{code:x} "));
        } else if index == 1 && c.is_ascii_digit() && chars[0] == '-' {
            out.push_str(&format!("\\{code:x} "));
        } else if index == 0 && c == '-' && chars.len() == 1 {
            out.push('\\');
            out.push(c);
        } else if code >= 0x80 || c == '-' || c == '_' || c.is_ascii_alphanumeric() {
            out.push(c);
        } else {
            out.push('\\');
            out.push(c);
        }
    }

    out
}

/// `#id` fragment from a non-empty `id` attribute
pub fn id_selector(node: &DomNode) -> Option<String> {
    node.id().map(|id| format!("#{}", css_escape(id)))
}

/// Lowercased type fragment; namespaced tags keep their colon escaped
pub fn tag_selector(node: &DomNode) -> Option<String> {
    node.tag_name()
        .map(|tag| tag.to_ascii_lowercase().replace(':', "\\:"))
}

/// One `.class` fragment per class token, in document order
pub fn class_selectors(node: &DomNode) -> Vec<String> {
    node.classes()
        .map(|class| format!(".{}", css_escape(class)))
        .collect()
}

/// `[name="value"]` fragments for every attribute not in the ignore set.
///
/// Valueless attributes emit the presence form `[name]`. The attribute map
/// has unspecified iteration order, so fragments are sorted by attribute
/// name to keep candidate order (and therefore output) deterministic.
pub fn attribute_selectors(node: &DomNode, ignore: &[String]) -> Vec<String> {
    let mut named: Vec<(&str, &str)> = node
        .attributes
        .iter()
        .filter(|(name, _)| !ignore.iter().any(|ignored| ignored == *name))
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();
    named.sort_by_key(|(name, _)| *name);

    named
        .into_iter()
        .map(|(name, value)| {
            if value.is_empty() {
                format!("[{name}]")
            } else {
                format!("[{name}=\"{}\"]", css_escape(value))
            }
        })
        .collect()
}

/// `[name="..."]` fragment from a non-empty `name` attribute
pub fn name_selector(node: &DomNode) -> Option<String> {
    node.attr("name")
        .filter(|name| !name.is_empty())
        .map(|name| format!("[name=\"{}\"]", css_escape(name)))
}

/// `[href="..."]` fragment from a non-empty `href` attribute
pub fn href_selector(node: &DomNode) -> Option<String> {
    node.attr("href")
        .filter(|href| !href.is_empty())
        .map(|href| format!("[href=\"{}\"]", css_escape(href)))
}

/// `:nth-child(n)` from the element's 1-based position among its parent's
/// element children; `None` for parentless nodes
pub fn nth_child_selector(arena: &DomArena, node_id: NodeId) -> Result<Option<String>> {
    Ok(arena
        .element_ordinal(node_id)?
        .map(|ordinal| format!(":nth-child({ordinal})")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::{DomNode, NodeType};

    fn element_with(attrs: &[(&str, &str)]) -> DomNode {
        let mut node = DomNode::new(NodeType::Element, "DIV".to_string());
        for (name, value) in attrs {
            node.attributes
                .insert(name.to_string(), value.to_string());
        }
        node
    }

    #[test]
    fn test_css_escape() {
        assert_eq!(css_escape("plain-name_1"), "plain-name_1");
        assert_eq!(css_escape("123abc"), "\\31 23abc");
        assert_eq!(css_escape("-5x"), "-\\35 x");
        assert_eq!(css_escape("-"), "\\-");
        assert_eq!(css_escape("a.b:c"), "a\\.b\\:c");
        assert_eq!(css_escape("a b"), "a\\ b");
        assert_eq!(css_escape("\u{0}x"), "\u{FFFD}x");
        assert_eq!(css_escape("\u{1}"), "\\1 ");
    }

    #[test]
    fn test_id_and_tag_fragments() {
        let node = element_with(&[("id", "top nav")]);
        assert_eq!(id_selector(&node), Some("#top\\ nav".to_string()));
        assert_eq!(tag_selector(&node), Some("div".to_string()));

        let node = element_with(&[]);
        assert_eq!(id_selector(&node), None);

        let svg = DomNode::new(NodeType::Element, "SVG:RECT".to_string());
        assert_eq!(tag_selector(&svg), Some("svg\\:rect".to_string()));

        let text = DomNode::new(NodeType::Text, "#text".to_string());
        assert_eq!(tag_selector(&text), None);
    }

    #[test]
    fn test_class_fragments() {
        let node = element_with(&[("class", "btn 2col")]);
        assert_eq!(class_selectors(&node), vec![".btn", ".\\32 col"]);
        assert!(class_selectors(&element_with(&[])).is_empty());
    }

    #[test]
    fn test_attribute_fragments_respect_ignore_set() {
        let node = element_with(&[
            ("id", "x"),
            ("class", "y"),
            ("data-kind", "menu"),
            ("disabled", ""),
            ("aria-label", "Close"),
        ]);
        let ignore = vec!["id".to_string(), "class".to_string(), "length".to_string()];

        assert_eq!(
            attribute_selectors(&node, &ignore),
            vec![
                "[aria-label=\"Close\"]",
                "[data-kind=\"menu\"]",
                "[disabled]",
            ]
        );
    }

    #[test]
    fn test_name_and_href_fragments() {
        let node = element_with(&[("name", "email"), ("href", "/a?b=c")]);
        assert_eq!(name_selector(&node), Some("[name=\"email\"]".to_string()));
        assert_eq!(
            href_selector(&node),
            Some("[href=\"\\/a\\?b\\=c\"]".to_string())
        );
        assert_eq!(name_selector(&element_with(&[("name", "")])), None);
        assert_eq!(href_selector(&element_with(&[])), None);
    }
}
