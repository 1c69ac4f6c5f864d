//! # TgMenu Bot
//! 
//! Telegram surface: Bot API client, keyboard markup, and per-update handlers.

pub mod error;
pub mod handlers;
pub mod markup;
pub mod media;
pub mod state;
pub mod telegram;

pub use error::BotError;
pub use handlers::handle_update;
pub use state::BotState;
pub use telegram::{ChatSurface, TelegramClient};
