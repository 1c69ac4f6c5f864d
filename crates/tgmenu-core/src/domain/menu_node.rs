// ============================================================================
// TgMenu Core - Menu Node Entity
// File: crates/tgmenu-core/src/domain/menu_node.rs
// Description: Folder or content leaf of the menu tree
// ============================================================================

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tgmenu_shared::types::Timestamps;
use uuid::Uuid;
use validator::Validate;

/// Menu node entity. Folders open into a nested keyboard, leaves show
/// their content. The tree is stored flat: `parent_id == None` is root level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct MenuNode {
    pub id: Uuid,

    #[validate(length(min = 1, max = 256, message = "Menu title must be between 1 and 256 characters"))]
    pub title: String,

    #[serde(default)]
    pub parent_id: Option<Uuid>,

    #[serde(default)]
    pub is_folder: bool,

    #[serde(default)]
    pub content: Option<String>,

    #[validate(length(max = 256, message = "Image reference too long"))]
    #[serde(default)]
    pub image_ref: Option<String>,

    #[serde(default)]
    pub guest_access: bool,

    /// Roles explicitly granted visibility, independent of `guest_access`
    #[serde(default)]
    pub roles: BTreeSet<Uuid>,

    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl MenuNode {
    pub fn new(
        title: String,
        parent_id: Option<Uuid>,
        is_folder: bool,
        content: Option<String>,
        image_ref: Option<String>,
        guest_access: bool,
        roles: BTreeSet<Uuid>,
    ) -> Result<Self, validator::ValidationErrors> {
        let node = Self {
            id: Uuid::new_v4(),
            title: title.trim().to_string(),
            parent_id,
            is_folder,
            content,
            image_ref: image_ref.map(|r| r.trim().to_string()).filter(|r| !r.is_empty()),
            guest_access,
            roles,
            timestamps: Timestamps::default(),
        };

        node.validate()?;
        Ok(node)
    }

    pub fn folder(title: &str, parent_id: Option<Uuid>) -> Result<Self, validator::ValidationErrors> {
        Self::new(title.to_string(), parent_id, true, None, None, false, BTreeSet::new())
    }

    pub fn leaf(title: &str, parent_id: Option<Uuid>, content: &str) -> Result<Self, validator::ValidationErrors> {
        Self::new(
            title.to_string(),
            parent_id,
            false,
            Some(content.to_string()),
            None,
            false,
            BTreeSet::new(),
        )
    }

    pub fn with_guest_access(mut self) -> Self {
        self.guest_access = true;
        self
    }

    pub fn with_role(mut self, role_id: Uuid) -> Self {
        self.roles.insert(role_id);
        self
    }

    pub fn with_image(mut self, image_ref: &str) -> Self {
        self.image_ref = Some(image_ref.to_string());
        self
    }

    pub fn is_granted_to(&self, role_id: &Uuid) -> bool {
        self.roles.contains(role_id)
    }

    /// Content to display, `None` when missing or blank.
    pub fn display_content(&self) -> Option<&str> {
        self.content.as_deref().map(str::trim).filter(|c| !c.is_empty())
    }
}
