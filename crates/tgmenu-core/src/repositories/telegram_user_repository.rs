//! Telegram user repository trait (port)

use async_trait::async_trait;
use crate::domain::TelegramUser;
use crate::error::DomainError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TelegramUserRepository: Send + Sync {
    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<TelegramUser>, DomainError>;
}
