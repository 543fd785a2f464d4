//! Unique CSS selector generation
//!
//! Computes the shortest selector path (under a greedy, priority-ordered
//! strategy) that identifies exactly one element within its queryable
//! scope, a document or shadow boundary in the [`dom`] arena.
//!
//! ## Pipeline
//!
//! ```text
//! element → candidate fragments per ancestor level
//!         → bounded combination search, locally unique per level
//!         → bottom-up path assembly, globally unique or None
//! ```
//!
//! ```
//! use dom::parse_document;
//! use selector::{unique_selector, Options};
//! use serde_json::json;
//!
//! let arena = parse_document(&json!({
//!     "nodeType": 9,
//!     "nodeName": "#document",
//!     "children": [{
//!         "nodeType": 1,
//!         "nodeName": "BODY",
//!         "children": [
//!             {"nodeType": 1, "nodeName": "BUTTON", "attributes": {"id": "save"}}
//!         ]
//!     }]
//! })).unwrap();
//!
//! let button = arena.find_one(|n| n.attr("id") == Some("save")).unwrap();
//! let selector = unique_selector(&arena, button, &Options::default()).unwrap();
//! assert_eq!(selector.as_deref(), Some("#save"));
//! ```

pub mod combinations;
pub mod extract;
pub mod options;
pub mod path;
pub mod resolve;
pub mod uniqueness;

pub use options::{Options, SelectorKind};
pub use path::unique_selector;
