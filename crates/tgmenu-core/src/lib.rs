//! # TgMenu Core
//! 
//! Domain entities, repository traits, and the stateless navigation engine
//! behind the Telegram menu: visibility, pagination, navigation tokens,
//! keyboard building and interaction dispatch.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
