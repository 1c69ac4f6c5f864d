//! # TgMenu Infrastructure
//! 
//! Store adapters: PostgreSQL repositories and the JSON snapshot loader.

pub mod database;
pub mod snapshot;

pub use database::{
    create_pool, run_migrations, PgMenuRepository, PgRoleRepository, PgTelegramUserRepository,
};
pub use snapshot::{load_snapshot, parse_snapshot, MenuSnapshot};
