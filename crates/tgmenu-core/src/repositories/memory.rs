//! In-memory snapshot store

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{MenuNode, Role, TelegramUser};
use crate::error::DomainError;
use crate::repositories::{MenuRepository, RoleRepository, TelegramUserRepository};

/// Immutable snapshot of nodes, roles and users serving all three read
/// ports. Populated once, then shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMenuStore {
    nodes: HashMap<Uuid, MenuNode>,
    roles: HashMap<Uuid, Role>,
    users: HashMap<i64, TelegramUser>,
}

impl InMemoryMenuStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(
        nodes: impl IntoIterator<Item = MenuNode>,
        roles: impl IntoIterator<Item = Role>,
        users: impl IntoIterator<Item = TelegramUser>,
    ) -> Self {
        Self {
            nodes: nodes.into_iter().map(|n| (n.id, n)).collect(),
            roles: roles.into_iter().map(|r| (r.id, r)).collect(),
            users: users.into_iter().map(|u| (u.telegram_id, u)).collect(),
        }
    }

    pub fn insert_node(&mut self, node: MenuNode) -> &mut Self {
        self.nodes.insert(node.id, node);
        self
    }

    pub fn insert_role(&mut self, role: Role) -> &mut Self {
        self.roles.insert(role.id, role);
        self
    }

    pub fn insert_user(&mut self, user: TelegramUser) -> &mut Self {
        self.users.insert(user.telegram_id, user);
        self
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuStore {
    async fn get_children(&self, parent_id: Option<Uuid>) -> Result<Vec<MenuNode>, DomainError> {
        let mut children: Vec<MenuNode> = self
            .nodes
            .values()
            .filter(|n| n.parent_id == parent_id)
            .cloned()
            .collect();
        children.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(children)
    }

    async fn get_node(&self, id: &Uuid) -> Result<Option<MenuNode>, DomainError> {
        Ok(self.nodes.get(id).cloned())
    }
}

#[async_trait]
impl RoleRepository for InMemoryMenuStore {
    async fn get_role(&self, id: &Uuid) -> Result<Option<Role>, DomainError> {
        Ok(self.roles.get(id).cloned())
    }

    async fn find_minimal(&self) -> Result<Option<Role>, DomainError> {
        let mut minimal: Vec<&Role> = self.roles.values().filter(|r| r.is_minimal).collect();
        // Several flagged roles is an upstream integrity error; pick one deterministically.
        minimal.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(minimal.first().map(|r| (*r).clone()))
    }
}

#[async_trait]
impl TelegramUserRepository for InMemoryMenuStore {
    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<TelegramUser>, DomainError> {
        Ok(self.users.get(&telegram_id).cloned())
    }
}
