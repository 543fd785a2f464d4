//! Build an arena from a serialized document
//!
//! Input is a nested JSON node description, one object per node:
//!
//! ```json
//! {
//!   "nodeType": 9,
//!   "nodeName": "#document",
//!   "children": [{
//!     "nodeType": 1,
//!     "nodeName": "HTML",
//!     "attributes": {"lang": "en"},
//!     "children": [...]
//!   }]
//! }
//! ```
//!
//! Elements may carry a `shadowRoots` array; each entry becomes a
//! DocumentFragment child marked with its `shadowRootType`.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType, ShadowRootType};
use serde_json::Value;
use smallvec::SmallVec;

/// Parse a JSON document description into a fresh arena
pub fn parse_document(document: &Value) -> Result<DomArena> {
    let mut arena = DomArena::new();
    let root_id = parse_node(&mut arena, document, None)?;
    arena.set_root(root_id)?;
    Ok(arena)
}

fn parse_node(arena: &mut DomArena, value: &Value, parent_id: Option<NodeId>) -> Result<NodeId> {
    let raw_type = value
        .get("nodeType")
        .and_then(Value::as_u64)
        .ok_or_else(|| DomError::DocumentError("missing nodeType".to_string()))?;

    let node_type = u8::try_from(raw_type)
        .ok()
        .and_then(NodeType::from_u8)
        .ok_or_else(|| DomError::InvalidNodeType {
            expected: "a DOM node type".to_string(),
            actual: raw_type.to_string(),
        })?;

    let node_name = value
        .get("nodeName")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    let mut node = DomNode::new(node_type, node_name);
    node.parent_id = parent_id;
    node.node_value = value
        .get("nodeValue")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();

    if let Some(attributes) = value.get("attributes").and_then(Value::as_object) {
        for (name, attr_value) in attributes {
            let attr_value = attr_value
                .as_str()
                .ok_or_else(|| {
                    DomError::DocumentError(format!("attribute `{name}` is not a string"))
                })?
                .to_string();
            node.attributes.insert(name.clone(), attr_value);
        }
    }

    if let Some(kind) = value.get("shadowRootType").and_then(Value::as_str) {
        node.shadow_root_type = match kind {
            "user-agent" => Some(ShadowRootType::UserAgent),
            "open" => Some(ShadowRootType::Open),
            "closed" => Some(ShadowRootType::Closed),
            other => {
                return Err(DomError::DocumentError(format!(
                    "unknown shadowRootType `{other}`"
                )))
            }
        };
    }

    let current = arena.add_node(node);

    if let Some(children) = value.get("children").and_then(Value::as_array) {
        let mut child_ids: SmallVec<[NodeId; 4]> = SmallVec::new();
        for child in children {
            child_ids.push(parse_node(arena, child, Some(current))?);
        }
        arena.get_mut(current)?.children_ids = child_ids;
    }

    if let Some(shadow_roots) = value.get("shadowRoots").and_then(Value::as_array) {
        for shadow in shadow_roots {
            let shadow_id = parse_node(arena, shadow, Some(current))?;
            if arena.get(shadow_id)?.shadow_root_type.is_none() {
                return Err(DomError::DocumentError(
                    "shadowRoots entry without shadowRootType".to_string(),
                ));
            }
            arena.get_mut(current)?.children_ids.push(shadow_id);
        }
    }

    Ok(current)
}
