//! Arena DOM with a small selector matching engine
//!
//! The tree is the queryable host that selector generation runs against:
//! nodes live in a single arena, navigation uses `u32` indices, and
//! [`query::match_all`] resolves a selector string within a scope.
//!
//! ## Core Design
//!
//! ```text
//! JSON document → DomArena (owned) → query::match_all(scope, selector)
//!                      ↓
//!                 NodeId (u32)
//! ```

pub mod arena;
pub mod builder;
pub mod error;
pub mod query;
pub mod types;

pub use arena::DomArena;
pub use builder::parse_document;
pub use error::{DomError, Result};
pub use types::*;
