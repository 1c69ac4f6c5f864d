// ============================================================================
// TgMenu Infrastructure - PostgreSQL Telegram User Repository
// File: crates/tgmenu-infrastructure/src/database/postgres/telegram_user_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use tgmenu_core::domain::TelegramUser;
use tgmenu_core::error::DomainError;
use tgmenu_core::repositories::TelegramUserRepository;
use tgmenu_shared::types::Timestamps;

pub struct PgTelegramUserRepository {
    pool: PgPool,
}

impl PgTelegramUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct TelegramUserRow {
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role_id: Option<Uuid>,
    pub email_id: Option<Uuid>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl From<TelegramUserRow> for TelegramUser {
    fn from(row: TelegramUserRow) -> Self {
        TelegramUser {
            telegram_id: row.telegram_id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            role_id: row.role_id,
            email_id: row.email_id,
            active: row.active,
            timestamps: Timestamps {
                created_at: row.created_at,
                edited_at: row.edited_at,
            },
        }
    }
}

#[async_trait]
impl TelegramUserRepository for PgTelegramUserRepository {
    async fn find_by_telegram_id(&self, telegram_id: i64) -> Result<Option<TelegramUser>, DomainError> {
        let row: Option<TelegramUserRow> = sqlx::query_as(
            r#"
            SELECT
                telegram_id, username, first_name, last_name,
                role_id, email_id, active, created_at, edited_at
            FROM telegram_users
            WHERE telegram_id = $1
            "#
        )
        .bind(telegram_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding telegram user {}: {}", telegram_id, e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }
}
