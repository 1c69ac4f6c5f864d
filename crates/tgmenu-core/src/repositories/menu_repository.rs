//! Menu repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::MenuNode;
use crate::error::DomainError;

/// Read-only view over the menu tree. Always reflects the latest committed
/// data; no caching is implied.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Direct children of `parent_id`, or root-level nodes for `None`.
    async fn get_children(&self, parent_id: Option<Uuid>) -> Result<Vec<MenuNode>, DomainError>;
    async fn get_node(&self, id: &Uuid) -> Result<Option<MenuNode>, DomainError>;
}
