//! Arena-based DOM tree storage
//!
//! A single `Vec<DomNode>` holds every node; navigation uses 4-byte indices
//! instead of pointers. No Rc/Arc, no recursion while traversing.
//!
//! ## Memory Layout
//!
//! ```text
//! Arena: Vec<DomNode>
//!        [Node0][Node1][Node2]...
//!         ↑ 4-byte index, not 8-byte pointer
//! ```

use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId};

/// Arena allocator for DOM nodes
#[derive(Debug, Default)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,

    /// Root node ID (if set)
    root_id: Option<NodeId>,
}

impl DomArena {
    /// Create a new empty arena
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            root_id: None,
        }
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            root_id: None,
        }
    }

    /// Add a node to the arena, returns its ID
    pub fn add_node(&mut self, mut node: DomNode) -> NodeId {
        let node_id = self.nodes.len() as NodeId;
        node.node_id = node_id;
        self.nodes.push(node);
        node_id
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Set root node
    pub fn set_root(&mut self, node_id: NodeId) -> Result<()> {
        // Verify node exists
        self.get(node_id)?;
        self.root_id = Some(node_id);
        Ok(())
    }

    /// Get root node ID
    pub fn root_id(&self) -> Option<NodeId> {
        self.root_id
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all nodes
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Get parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Get children of a node
    pub fn children(&self, node_id: NodeId) -> Result<Vec<&DomNode>> {
        let node = self.get(node_id)?;
        node.children_ids
            .iter()
            .map(|&child_id| self.get(child_id))
            .collect()
    }

    /// 1-based position of a node among its parent's element children.
    ///
    /// Text and comment siblings are not counted. `None` when the node has
    /// no parent.
    pub fn element_ordinal(&self, node_id: NodeId) -> Result<Option<usize>> {
        let node = self.get(node_id)?;
        let Some(parent_id) = node.parent_id else {
            return Ok(None);
        };

        let mut counter = 0;
        for &sibling_id in &self.get(parent_id)?.children_ids {
            if self.get(sibling_id)?.is_element() {
                counter += 1;
                if sibling_id == node_id {
                    return Ok(Some(counter));
                }
            }
        }
        Ok(None)
    }

    /// Root of the queryable scope containing a node.
    ///
    /// Walks up until the first non-element ancestor (document or shadow
    /// boundary). A detached element chain yields its topmost element.
    pub fn query_root(&self, node_id: NodeId) -> Result<NodeId> {
        let mut current = node_id;
        loop {
            match self.get(current)?.parent_id {
                Some(parent_id) => {
                    if self.get(parent_id)?.is_element() {
                        current = parent_id;
                    } else {
                        return Ok(parent_id);
                    }
                }
                None => return Ok(current),
            }
        }
    }

    /// Depth-first document-order descendants of a node, excluding the node
    /// itself.
    ///
    /// Never descends through a shadow boundary: a host's shadow roots and
    /// their contents stay invisible from enclosing scopes, matching query
    /// semantics.
    pub fn descendants(&self, node_id: NodeId) -> Result<Vec<NodeId>> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();

        for &child_id in self.get(node_id)?.children_ids.iter().rev() {
            if self.get(child_id)?.shadow_root_type.is_none() {
                stack.push(child_id);
            }
        }

        while let Some(current) = stack.pop() {
            result.push(current);
            for &child_id in self.get(current)?.children_ids.iter().rev() {
                if self.get(child_id)?.shadow_root_type.is_none() {
                    stack.push(child_id);
                }
            }
        }

        Ok(result)
    }

    /// Traverse tree depth-first (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Find nodes matching predicate
    pub fn find<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.nodes
            .iter()
            .enumerate()
            .filter_map(|(idx, node)| {
                if predicate(node) {
                    Some(idx as NodeId)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Find first node matching predicate
    pub fn find_one<F>(&self, predicate: F) -> Option<NodeId>
    where
        F: Fn(&DomNode) -> bool,
    {
        self.nodes.iter().enumerate().find_map(|(idx, node)| {
            if predicate(node) {
                Some(idx as NodeId)
            } else {
                None
            }
        })
    }
}
