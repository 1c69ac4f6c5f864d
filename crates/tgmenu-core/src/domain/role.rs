// ============================================================================
// TgMenu Core - Role Entity
// File: crates/tgmenu-core/src/domain/role.rs
// Description: Access class granted visibility on menu nodes
// ============================================================================

use serde::{Deserialize, Serialize};
use tgmenu_shared::types::Timestamps;
use uuid::Uuid;
use validator::Validate;

/// Role entity. At most one role system-wide carries `is_minimal`; that
/// invariant is kept by the administrative side, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Role {
    pub id: Uuid,

    #[validate(length(min = 1, max = 256, message = "Role title must be between 1 and 256 characters"))]
    pub title: String,

    #[serde(default)]
    pub is_minimal: bool,

    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Role {
    pub fn new(title: String, is_minimal: bool) -> Result<Self, validator::ValidationErrors> {
        let role = Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            is_minimal,
            timestamps: Timestamps::default(),
        };

        role.validate()?;
        Ok(role)
    }
}
