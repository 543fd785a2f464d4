//! Error types for DOM operations
//!
//! Simple, flat error hierarchy. No over-engineering.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(u32),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType { expected: String, actual: String },

    #[error("Invalid selector `{selector}`: {message}")]
    SelectorParse { selector: String, message: String },

    #[error("Document error: {0}")]
    DocumentError(String),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}

impl DomError {
    /// Build a selector parse error at a byte offset
    pub fn selector_parse(selector: &str, offset: usize, message: impl Into<String>) -> Self {
        DomError::SelectorParse {
            selector: selector.to_string(),
            message: format!("{} (at offset {})", message.into(), offset),
        }
    }
}
