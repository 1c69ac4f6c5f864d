// ============================================================================
// TgMenu Core - Telegram User Entity
// File: crates/tgmenu-core/src/domain/telegram_user.rs
// Description: Chat-platform user roster row read by the viewer resolver
// ============================================================================

use serde::{Deserialize, Serialize};
use tgmenu_shared::types::Timestamps;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelegramUser {
    pub telegram_id: i64,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub role_id: Option<Uuid>,

    /// Confirmed employee e-mail, set once the roster matched the user
    #[serde(default)]
    pub email_id: Option<Uuid>,

    #[serde(default = "default_active")]
    pub active: bool,

    #[serde(flatten)]
    pub timestamps: Timestamps,
}

fn default_active() -> bool {
    true
}

impl TelegramUser {
    pub fn new(telegram_id: i64, username: Option<String>) -> Self {
        Self {
            telegram_id,
            username,
            first_name: None,
            last_name: None,
            role_id: None,
            email_id: None,
            active: true,
            timestamps: Timestamps::default(),
        }
    }

    pub fn has_confirmed_email(&self) -> bool {
        self.email_id.is_some()
    }
}
