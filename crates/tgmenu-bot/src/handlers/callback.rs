//! Inline keyboard taps

use teloxide::types::CallbackQuery;
use tracing::{debug, warn};

use crate::error::BotError;
use crate::handlers::render::{render, EditTarget};
use crate::handlers::viewer_of;
use crate::state::BotState;

/// Render the view the callback token asks for, then acknowledge the query.
/// The acknowledgement is sent even when rendering failed, so the client
/// stops showing its progress indicator.
pub async fn handle_callback_query(state: &BotState, query: CallbackQuery) -> Result<(), BotError> {
    let outcome = render_callback(state, &query).await;

    if let Err(e) = state.surface.answer_callback_query(&query.id).await {
        warn!("Failed to answer callback query {}: {}", query.id, e);
    }

    outcome
}

async fn render_callback(state: &BotState, query: &CallbackQuery) -> Result<(), BotError> {
    let Some(message) = query.message.as_ref() else {
        debug!("Callback query {} has no message to update", query.id);
        return Ok(());
    };

    let viewer = viewer_of(state, Some(&query.from)).await?;
    let token = query.data.as_deref().unwrap_or_default();
    let reply = state.dispatcher.handle_callback(&viewer, token).await?;

    // Messages older than 48 hours come back inaccessible, without markup
    let origin = EditTarget {
        message_id: message.id(),
        markup: message
            .regular_message()
            .and_then(|m| m.reply_markup())
            .cloned(),
    };

    render(state, message.chat().id, reply, Some(origin)).await
}
