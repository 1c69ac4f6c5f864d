// ============================================================================
// TgMenu Infrastructure - PostgreSQL Role Repository
// File: crates/tgmenu-infrastructure/src/database/postgres/role_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use tgmenu_core::domain::Role;
use tgmenu_core::error::DomainError;
use tgmenu_core::repositories::RoleRepository;
use tgmenu_shared::types::Timestamps;

pub struct PgRoleRepository {
    pool: PgPool,
}

impl PgRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct RoleRow {
    pub id: Uuid,
    pub title: String,
    pub is_minimal: bool,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Role {
            id: row.id,
            title: row.title,
            is_minimal: row.is_minimal,
            timestamps: Timestamps {
                created_at: row.created_at,
                edited_at: row.edited_at,
            },
        }
    }
}

#[async_trait]
impl RoleRepository for PgRoleRepository {
    async fn get_role(&self, id: &Uuid) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, title, is_minimal, created_at, edited_at
            FROM roles
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding role by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_minimal(&self) -> Result<Option<Role>, DomainError> {
        let row: Option<RoleRow> = sqlx::query_as(
            r#"
            SELECT id, title, is_minimal, created_at, edited_at
            FROM roles
            WHERE is_minimal
            ORDER BY title
            LIMIT 1
            "#
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding minimal role: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }
}
