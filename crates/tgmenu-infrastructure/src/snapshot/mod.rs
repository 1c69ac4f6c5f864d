//! JSON snapshot backend
//!
//! Loads roles, menu nodes and the user roster from one JSON document into
//! an [`InMemoryMenuStore`], for running the bot without a database:
//!
//! ```json
//! { "roles": [...], "menus": [...], "telegram_users": [...] }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info, warn};
use validator::Validate;

use tgmenu_core::domain::{MenuNode, Role, TelegramUser};
use tgmenu_core::error::DomainError;
use tgmenu_core::repositories::InMemoryMenuStore;
use tgmenu_shared::constants::RESERVED_LABELS;

#[derive(Debug, Default, Deserialize)]
pub struct MenuSnapshot {
    #[serde(default)]
    pub roles: Vec<Role>,
    #[serde(default)]
    pub menus: Vec<MenuNode>,
    #[serde(default)]
    pub telegram_users: Vec<TelegramUser>,
}

impl MenuSnapshot {
    /// Validate every entity and build the store.
    pub fn into_store(self) -> Result<InMemoryMenuStore, DomainError> {
        for role in &self.roles {
            role.validate()?;
        }
        for node in &self.menus {
            node.validate()?;
        }

        let minimal = self.roles.iter().filter(|r| r.is_minimal).count();
        if minimal > 1 {
            warn!("Snapshot flags {} roles as minimal, expected at most one", minimal);
        }
        for node in self.shadowed_root_nodes() {
            warn!(
                "Root node {} is titled {:?}, a reserved label; its button will not open it",
                node.id, node.title
            );
        }

        Ok(InMemoryMenuStore::from_parts(self.menus, self.roles, self.telegram_users))
    }

    /// Root nodes whose title collides with a reserved keyboard label.
    pub fn shadowed_root_nodes(&self) -> impl Iterator<Item = &MenuNode> {
        self.menus
            .iter()
            .filter(|n| n.parent_id.is_none() && RESERVED_LABELS.contains(&n.title.as_str()))
    }
}

pub fn parse_snapshot(json: &str) -> Result<InMemoryMenuStore, DomainError> {
    let snapshot: MenuSnapshot = serde_json::from_str(json).map_err(|e| {
        error!("Invalid menu snapshot: {}", e);
        DomainError::InternalError(format!("Invalid menu snapshot: {}", e))
    })?;
    snapshot.into_store()
}

pub async fn load_snapshot(path: impl AsRef<Path>) -> Result<InMemoryMenuStore, DomainError> {
    let path = path.as_ref();
    let json = tokio::fs::read_to_string(path).await.map_err(|e| {
        error!("Failed to read menu snapshot {}: {}", path.display(), e);
        DomainError::InternalError(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let store = parse_snapshot(&json)?;
    info!(
        "Loaded menu snapshot {}: {} nodes, {} roles",
        path.display(),
        store.node_count(),
        store.role_count()
    );
    Ok(store)
}
