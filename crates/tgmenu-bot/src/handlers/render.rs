//! Executes a dispatcher reply on the chat surface

use teloxide::types::{ChatId, InlineKeyboardMarkup, MessageId};
use tracing::debug;

use tgmenu_core::domain::{Delivery, KeyboardMode, Reply};

use crate::error::BotError;
use crate::markup::{inline_markup, reply_markup};
use crate::media::resolve_image;
use crate::state::BotState;

/// The message an inline button was pressed on, with the keyboard it
/// currently shows.
pub struct EditTarget {
    pub message_id: MessageId,
    pub markup: Option<InlineKeyboardMarkup>,
}

/// Send `reply` to `chat_id`. Without an `origin` every reply is sent fresh.
pub async fn render(
    state: &BotState,
    chat_id: ChatId,
    reply: Reply,
    origin: Option<EditTarget>,
) -> Result<(), BotError> {
    let surface = state.surface.as_ref();

    match reply {
        Reply::Acknowledge => Ok(()),

        Reply::Keyboard { text, keyboard, delivery } => match (delivery, origin) {
            (Delivery::Edit, Some(target)) if keyboard.mode == KeyboardMode::Nested => {
                surface
                    .edit_message_text(chat_id, target.message_id, &text, Some(inline_markup(&keyboard)))
                    .await
            }
            _ => surface.send_message(chat_id, &text, Some(reply_markup(&keyboard))).await,
        },

        Reply::Content { text, image_ref: Some(image), .. } => {
            // A text message cannot become a photo; the keyboard stays put
            let photo = resolve_image(&image, state.media.base_url.as_deref());
            debug!("Sending photo {} to chat {}", photo, chat_id.0);
            surface.send_photo(chat_id, &photo, &text).await
        }

        Reply::Content { text, image_ref: None, delivery } => match (delivery, origin) {
            (Delivery::Edit, Some(target)) => {
                surface
                    .edit_message_text(chat_id, target.message_id, &text, target.markup)
                    .await
            }
            _ => surface.send_message(chat_id, &text, None).await,
        },
    }
}
