//! Core node types for the arena DOM
//!
//! Key design principles:
//! 1. Use u32 for indices (4 bytes vs 8 bytes pointer)
//! 2. Use SmallVec for child lists (most nodes have few children)
//! 3. Nodes carry no back-references except the parent index

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Node identifier (index into arena)
/// u32 allows 4 billion nodes, enough for any document
pub type NodeId = u32;

/// Node type matching DOM specification numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            5 => Some(NodeType::EntityReference),
            6 => Some(NodeType::Entity),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            12 => Some(NodeType::Notation),
            _ => None,
        }
    }
}

/// Shadow root flavor; a DocumentFragment carrying one of these is a
/// queryable scope boundary of its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShadowRootType {
    UserAgent,
    Open,
    Closed,
}

/// A single DOM tree node
///
/// Design:
/// - Navigation via indices, not pointers
/// - `node_name` holds the uppercase tag for elements, `#text`/`#document`
///   style names otherwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>,

    pub node_name: String,
    pub node_value: String,
    pub attributes: AHashMap<String, String>,

    pub shadow_root_type: Option<ShadowRootType>,
}

impl DomNode {
    /// Create a new node; `node_id` is assigned by the arena on insertion
    pub fn new(node_type: NodeType, node_name: String) -> Self {
        Self {
            node_id: 0,
            node_type,
            parent_id: None,
            children_ids: SmallVec::new(),
            node_name,
            node_value: String::new(),
            attributes: AHashMap::new(),
            shadow_root_type: None,
        }
    }

    /// Get tag name for element nodes
    pub fn tag_name(&self) -> Option<&str> {
        if self.node_type == NodeType::Element {
            Some(&self.node_name)
        } else {
            None
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Check if node is a queryable scope root (document or shadow boundary)
    pub fn is_scope_root(&self) -> bool {
        matches!(
            self.node_type,
            NodeType::Document | NodeType::DocumentFragment
        )
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Get the `id` attribute when present and non-empty
    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    /// Class tokens from the `class` attribute, in document order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    /// Check membership in the class list
    pub fn has_class(&self, name: &str) -> bool {
        self.classes().any(|class| class == name)
    }
}
