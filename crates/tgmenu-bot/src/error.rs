//! Bot errors

use teloxide::{ApiError, RequestError};
use thiserror::Error;
use tgmenu_core::error::DomainError;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Telegram request failed: {0}")]
    Request(#[from] RequestError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("HTTP client setup failed: {0}")]
    ClientSetup(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl BotError {
    /// Telegram refuses edits that would leave the message unchanged.
    pub fn is_not_modified(&self) -> bool {
        match self {
            BotError::Request(RequestError::Api(ApiError::MessageNotModified)) => true,
            BotError::Request(RequestError::Api(ApiError::Unknown(description))) => {
                description.contains("message is not modified")
            }
            _ => false,
        }
    }
}
