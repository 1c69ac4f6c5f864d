// ============================================================================
// TgMenu Infrastructure - PostgreSQL Menu Repository
// File: crates/tgmenu-infrastructure/src/database/postgres/menu_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

use tgmenu_core::domain::MenuNode;
use tgmenu_core::error::DomainError;
use tgmenu_core::repositories::MenuRepository;
use tgmenu_shared::types::Timestamps;

pub struct PgMenuRepository {
    pool: PgPool,
}

impl PgMenuRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping; grants are folded in from menu_roles
#[derive(Debug, FromRow)]
struct MenuRow {
    pub id: Uuid,
    pub title: String,
    pub parent_id: Option<Uuid>,
    pub is_folder: bool,
    pub content: Option<String>,
    pub image_ref: Option<String>,
    pub guest_access: bool,
    pub roles: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
}

impl From<MenuRow> for MenuNode {
    fn from(row: MenuRow) -> Self {
        MenuNode {
            id: row.id,
            title: row.title,
            parent_id: row.parent_id,
            is_folder: row.is_folder,
            content: row.content,
            image_ref: row.image_ref.filter(|r| !r.trim().is_empty()),
            guest_access: row.guest_access,
            roles: row.roles.into_iter().collect(),
            timestamps: Timestamps {
                created_at: row.created_at,
                edited_at: row.edited_at,
            },
        }
    }
}

const SELECT_MENU: &str = r#"
    SELECT
        m.id, m.title, m.parent_id, m.is_folder, m.content, m.image_ref,
        m.guest_access, m.created_at, m.edited_at,
        COALESCE(
            array_agg(mr.role_id) FILTER (WHERE mr.role_id IS NOT NULL),
            '{}'::uuid[]
        ) AS roles
    FROM menus m
    LEFT JOIN menu_roles mr ON mr.menu_id = m.id
"#;

#[async_trait]
impl MenuRepository for PgMenuRepository {
    async fn get_children(&self, parent_id: Option<Uuid>) -> Result<Vec<MenuNode>, DomainError> {
        let query = format!(
            "{} WHERE m.parent_id IS NOT DISTINCT FROM $1 GROUP BY m.id ORDER BY m.title",
            SELECT_MENU
        );

        let rows: Vec<MenuRow> = sqlx::query_as(&query)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error fetching children of {:?}: {}", parent_id, e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn get_node(&self, id: &Uuid) -> Result<Option<MenuNode>, DomainError> {
        let query = format!("{} WHERE m.id = $1 GROUP BY m.id", SELECT_MENU);

        let row: Option<MenuRow> = sqlx::query_as(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error finding menu node {}: {}", id, e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(|r| r.into()))
    }
}
