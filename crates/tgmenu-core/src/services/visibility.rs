// ============================================================================
// TgMenu Core - Visibility Filter
// File: crates/tgmenu-core/src/services/visibility.rs
// ============================================================================
//! Role and guest-access gating of menu nodes.
//!
//! A node is visible iff it has guest access, or the viewer holds a role
//! explicitly granted on it. Folders and leaves are treated alike; an
//! invisible folder hides its whole subtree.

use tgmenu_shared::constants::MAX_TREE_DEPTH;
use tracing::warn;

use crate::domain::{MenuNode, Viewer};
use crate::error::DomainError;
use crate::repositories::MenuRepository;

pub fn is_visible(node: &MenuNode, viewer: &Viewer) -> bool {
    node.guest_access || viewer.role_id().is_some_and(|role| node.is_granted_to(role))
}

/// Subset of `nodes` the viewer may see, in input order.
pub fn visible(nodes: Vec<MenuNode>, viewer: &Viewer) -> Vec<MenuNode> {
    nodes.into_iter().filter(|n| is_visible(n, viewer)).collect()
}

/// Deterministic display order: title ascending, id as tie-break.
pub fn sort_for_display(nodes: &mut [MenuNode]) {
    nodes.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
}

/// Whether `node` and every ancestor up to the root is visible to the viewer.
///
/// Walks the parent chain one lookup at a time. A missing ancestor, or a
/// chain longer than `MAX_TREE_DEPTH` (only possible with a cycle), makes
/// the node unreachable.
pub async fn is_reachable<M>(repo: &M, node: &MenuNode, viewer: &Viewer) -> Result<bool, DomainError>
where
    M: MenuRepository + ?Sized,
{
    if !is_visible(node, viewer) {
        return Ok(false);
    }

    let mut next = node.parent_id;
    for _ in 0..MAX_TREE_DEPTH {
        let Some(parent_id) = next else {
            return Ok(true);
        };
        match repo.get_node(&parent_id).await? {
            Some(parent) if is_visible(&parent, viewer) => next = parent.parent_id,
            Some(_) => return Ok(false),
            None => {
                warn!("Dangling parent reference {} under node {}", parent_id, node.id);
                return Ok(false);
            }
        }
    }

    warn!("Parent chain of node {} exceeds depth {}", node.id, MAX_TREE_DEPTH);
    Ok(false)
}
