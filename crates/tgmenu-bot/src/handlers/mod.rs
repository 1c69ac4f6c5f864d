//! Per-update handlers

pub mod callback;
pub mod message;
pub mod render;

use teloxide::types::{Update, UpdateKind, User};
use tracing::{debug, error};

use tgmenu_core::domain::Viewer;

use crate::error::BotError;
use crate::state::BotState;

/// Handle one update end to end. Failures are logged and swallowed so one
/// bad update never affects the others.
pub async fn handle_update(state: &BotState, update: Update) {
    let update_id = update.id.0;

    let result = match update.kind {
        UpdateKind::CallbackQuery(query) => callback::handle_callback_query(state, query).await,
        UpdateKind::Message(message) => message::handle_message(state, message).await,
        _ => {
            debug!("Update {} has nothing to handle", update_id);
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("Failed to handle update {}: {}", update_id, e);
    }
}

/// Senderless updates (channel posts) view the menu as a guest.
async fn viewer_of(state: &BotState, user: Option<&User>) -> Result<Viewer, BotError> {
    match user {
        // Telegram user ids fit in 52 bits
        Some(user) => Ok(state.viewers.resolve(user.id.0 as i64).await?),
        None => Ok(Viewer::Guest),
    }
}
