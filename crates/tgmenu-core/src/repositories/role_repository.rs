//! Role repository trait (port)

use async_trait::async_trait;
use uuid::Uuid;
use crate::domain::Role;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn get_role(&self, id: &Uuid) -> Result<Option<Role>, DomainError>;
    /// The role flagged `is_minimal`, if one is configured.
    async fn find_minimal(&self) -> Result<Option<Role>, DomainError>;
}
