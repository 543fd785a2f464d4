//! Bottom-up path assembly
//!
//! Walks the ancestor chain from the target element to the queryable
//! boundary, resolves one locally-unique fragment per level, then grows the
//! path one ancestor at a time until it is unique within the whole scope.
//! Fragments only ever need local uniqueness; adding ancestors is what
//! resolves collisions a single level cannot see.

use dom::{DomArena, DomError, NodeId, Result};
use tracing::debug;

use crate::options::Options;
use crate::resolve::{resolve, ElementSelectors};
use crate::uniqueness::matches_exactly_one;

/// Compute a selector that uniquely identifies `element` within its
/// queryable scope (document or shadow boundary).
///
/// Returns `Ok(None)` when the ancestor chain is exhausted without reaching
/// global uniqueness. Wildcard fragments get no special treatment: a path
/// containing `*` is returned only when it passes the same global
/// uniqueness test as any other path. Errs only on caller misuse: an
/// unknown node id or a non-element node.
pub fn unique_selector(
    arena: &DomArena,
    element: NodeId,
    options: &Options,
) -> Result<Option<String>> {
    let node = arena.get(element)?;
    if !node.is_element() {
        return Err(DomError::InvalidNodeType {
            expected: "Element".to_string(),
            actual: format!("{:?}", node.node_type),
        });
    }

    let scope_root = arena.query_root(element)?;

    // Target first, then every element ancestor up to the boundary. A
    // detached chain simply ends where the parents run out.
    let mut chain = Vec::new();
    let mut cursor = Some(element);
    while let Some(level) = cursor {
        let level_node = arena.get(level)?;
        if !level_node.is_element() {
            break;
        }
        chain.push(level);
        cursor = level_node.parent_id;
    }

    let mut fragments = Vec::with_capacity(chain.len());
    for &level in &chain {
        let mut candidates = ElementSelectors::collect(
            arena,
            level,
            &options.selector_types,
            &options.attributes_to_ignore,
        )?;
        if let Some(pattern) = &options.exclude_regex {
            candidates.apply_exclusions(pattern);
        }
        fragments.push(resolve(arena, level, &options.selector_types, &candidates)?);
    }

    let mut path: Vec<&str> = Vec::with_capacity(fragments.len());
    for fragment in &fragments {
        path.insert(0, fragment.as_str());
        let selector = path.join(" ");
        if matches_exactly_one(arena, scope_root, &selector, element) {
            debug!(selector = %selector, levels = path.len(), "unique selector found");
            return Ok(Some(selector));
        }
    }

    debug!(levels = fragments.len(), "ancestor chain exhausted");
    Ok(None)
}
