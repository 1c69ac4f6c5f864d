// ============================================================================
// TgMenu Bot - Telegram Client
// File: crates/tgmenu-bot/src/telegram/client.rs
// ============================================================================
//! `teloxide` bot behind the chat surface, throttled with `governor`.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use teloxide::prelude::*;
use teloxide::types::{
    AllowedUpdate, InlineKeyboardMarkup, InputFile, MessageId, ReplyMarkup, Update,
};
use tracing::{debug, error};
use url::Url;

use tgmenu_shared::config::TelegramSettings;
use tgmenu_shared::constants::{CAPTION_MAX_CHARS, MESSAGE_TEXT_MAX_CHARS};
use tgmenu_shared::utils::{is_absolute_url, truncate_chars};

use crate::error::BotError;
use crate::telegram::surface::ChatSurface;

pub struct TelegramClient {
    bot: Bot,
    limiter: DefaultDirectRateLimiter,
}

impl TelegramClient {
    pub fn new(settings: &TelegramSettings) -> Result<Self, BotError> {
        // Long polls hold the request open for the poll timeout on top of
        // the usual round trip
        let timeout = Duration::from_secs(
            settings.request_timeout_secs + u64::from(settings.poll_timeout_secs),
        );
        let http = teloxide::net::default_reqwest_settings()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::ClientSetup(e.to_string()))?;

        let bot = Bot::with_client(&settings.bot_token, http)
            .set_api_url(Url::parse(&settings.api_base_url)?);

        let per_second = NonZeroU32::new(settings.max_requests_per_second).unwrap_or(NonZeroU32::MIN);

        Ok(Self {
            bot,
            limiter: RateLimiter::direct(Quota::per_second(per_second)),
        })
    }

    /// Long-poll for updates from `offset` on. Not throttled.
    pub async fn get_updates(&self, offset: i32, timeout_secs: u32) -> Result<Vec<Update>, BotError> {
        let updates = self
            .bot
            .get_updates()
            .offset(offset)
            .timeout(timeout_secs)
            .allowed_updates(vec![AllowedUpdate::Message, AllowedUpdate::CallbackQuery])
            .await?;
        Ok(updates)
    }

    async fn throttle(&self, method: &str) {
        self.limiter.until_ready().await;
        debug!("Telegram call {}", method);
    }
}

#[async_trait]
impl ChatSurface for TelegramClient {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        markup: Option<ReplyMarkup>,
    ) -> Result<(), BotError> {
        self.throttle("sendMessage").await;

        let mut request = self
            .bot
            .send_message(chat_id, truncate_chars(text, MESSAGE_TEXT_MAX_CHARS));
        if let Some(markup) = markup {
            request = request.reply_markup(markup);
        }
        request.await?;
        Ok(())
    }

    async fn edit_message_text(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
        text: &str,
        markup: Option<InlineKeyboardMarkup>,
    ) -> Result<(), BotError> {
        self.throttle("editMessageText").await;

        let mut request = self
            .bot
            .edit_message_text(chat_id, message_id, truncate_chars(text, MESSAGE_TEXT_MAX_CHARS));
        if let Some(markup) = markup {
            request = request.reply_markup(markup);
        }

        match request.await.map_err(BotError::from) {
            Ok(_) => Ok(()),
            Err(e) if e.is_not_modified() => {
                debug!("Message {} in chat {} already up to date", message_id.0, chat_id.0);
                Ok(())
            }
            Err(e) => {
                error!("Failed to edit message {} in chat {}: {}", message_id.0, chat_id.0, e);
                Err(e)
            }
        }
    }

    async fn send_photo(&self, chat_id: ChatId, photo: &str, caption: &str) -> Result<(), BotError> {
        self.throttle("sendPhoto").await;

        let file = if is_absolute_url(photo) {
            InputFile::url(Url::parse(photo)?)
        } else {
            InputFile::file_id(photo.to_string())
        };

        let mut request = self.bot.send_photo(chat_id, file);
        let caption = truncate_chars(caption, CAPTION_MAX_CHARS);
        if !caption.is_empty() {
            request = request.caption(caption);
        }
        request.await?;
        Ok(())
    }

    async fn answer_callback_query(&self, callback_query_id: &str) -> Result<(), BotError> {
        self.throttle("answerCallbackQuery").await;
        self.bot.answer_callback_query(callback_query_id.to_string()).await?;
        Ok(())
    }
}
