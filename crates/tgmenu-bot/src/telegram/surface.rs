//! Chat surface trait (port)

use async_trait::async_trait;
use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId, ReplyMarkup};

use crate::error::BotError;

/// The four outbound operations the menu needs from a chat platform.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChatSurface: Send + Sync {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<(), BotError>;

    /// Replace the text of a sent message; `markup` becomes its new inline
    /// keyboard, `None` removes it.
    async fn edit_message_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError>;

    /// `photo` is an absolute URL or a Telegram `file_id`. An empty caption
    /// is omitted.
    async fn send_photo(&self, chat_id: ChatId, photo: &str, caption: &str) -> Result<(), BotError>;

    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), BotError>;
}
