use std::sync::Arc;

use tgmenu_core::repositories::{MenuRepository, RoleRepository, TelegramUserRepository};
use tgmenu_core::services::{InteractionDispatcher, KeyboardBuilder, ViewerResolver};
use tgmenu_shared::config::{MediaSettings, MenuSettings};

use crate::telegram::ChatSurface;

/// Everything a single update handler needs. Read-only once built; shared
/// across concurrent handlers behind an `Arc`.
pub struct BotState {
    pub surface: Arc<dyn ChatSurface>,
    pub dispatcher: InteractionDispatcher<dyn MenuRepository>,
    pub viewers: ViewerResolver<dyn TelegramUserRepository, dyn RoleRepository>,
    pub media: MediaSettings,
}

impl BotState {
    pub fn new(
        surface: Arc<dyn ChatSurface>,
        menus: Arc<dyn MenuRepository>,
        roles: Arc<dyn RoleRepository>,
        users: Arc<dyn TelegramUserRepository>,
        menu: MenuSettings,
        media: MediaSettings,
    ) -> Self {
        let keyboards = KeyboardBuilder::new(menus.clone(), menu);
        Self {
            surface,
            dispatcher: InteractionDispatcher::new(menus, keyboards),
            viewers: ViewerResolver::new(users, roles),
            media,
        }
    }
}
