//! Telegram Bot API surface over `teloxide`

pub mod client;
pub mod surface;

pub use client::TelegramClient;
pub use surface::ChatSurface;
#[cfg(test)]
pub use surface::MockChatSurface;
