//! Uniqueness testing against a scope
//!
//! One function, two uses: the resolver tests fragments against an
//! element's parent (local uniqueness), the path assembler tests the
//! accumulated path against the queryable root (global uniqueness).

use dom::{query, DomArena, NodeId};
use tracing::trace;

/// True iff `selector` matches exactly one node within `scope` and that
/// node is `target`.
///
/// Defensive by contract: the empty string is rejected without touching
/// the matching engine, and a selector the engine cannot parse counts as
/// "never unique" instead of an error.
pub fn matches_exactly_one(
    arena: &DomArena,
    scope: NodeId,
    selector: &str,
    target: NodeId,
) -> bool {
    if selector.is_empty() {
        return false;
    }

    match query::match_all(arena, scope, selector) {
        Ok(matches) => matches.len() == 1 && matches[0] == target,
        Err(error) => {
            trace!(selector, %error, "selector rejected by matching engine");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::parse_document;
    use serde_json::json;

    fn arena() -> DomArena {
        parse_document(&json!({
            "nodeType": 9,
            "nodeName": "#document",
            "children": [{
                "nodeType": 1,
                "nodeName": "BODY",
                "children": [
                    {"nodeType": 1, "nodeName": "P", "attributes": {"id": "solo"}},
                    {"nodeType": 1, "nodeName": "P", "attributes": {"class": "twin"}},
                    {"nodeType": 1, "nodeName": "P", "attributes": {"class": "twin"}}
                ]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_exactly_one_match() {
        let arena = arena();
        let root = arena.root_id().unwrap();
        let solo = arena.find_one(|n| n.attr("id") == Some("solo")).unwrap();
        let twin = arena.find_one(|n| n.has_class("twin")).unwrap();

        assert!(matches_exactly_one(&arena, root, "#solo", solo));
        // Right cardinality, wrong node
        assert!(!matches_exactly_one(&arena, root, "#solo", twin));
        // Two matches
        assert!(!matches_exactly_one(&arena, root, ".twin", twin));
        // No matches
        assert!(!matches_exactly_one(&arena, root, "#absent", solo));
    }

    #[test]
    fn test_defensive_on_bad_input() {
        let arena = arena();
        let root = arena.root_id().unwrap();
        let solo = arena.find_one(|n| n.attr("id") == Some("solo")).unwrap();

        assert!(!matches_exactly_one(&arena, root, "", solo));
        assert!(!matches_exactly_one(&arena, root, "[broken", solo));
        assert!(!matches_exactly_one(&arena, root, ":visited", solo));
    }
}
