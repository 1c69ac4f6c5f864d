//! # TgMenu Core - Domain Module
//! 
//! Domain entities of the menu tree and the navigation protocol.

pub mod menu_node;
pub mod role;
pub mod viewer;
pub mod telegram_user;
pub mod navigation;
pub mod keyboard;
pub mod reply;

// Re-export all entities and enums
pub use menu_node::MenuNode;
pub use role::Role;
pub use viewer::Viewer;
pub use telegram_user::TelegramUser;
pub use navigation::NavAction;
pub use keyboard::{Button, Keyboard, KeyboardMode};
pub use reply::{Delivery, Reply};
