//! PostgreSQL repository implementations

pub mod menu_repo_impl;
pub mod role_repo_impl;
pub mod telegram_user_repo_impl;

pub use menu_repo_impl::PgMenuRepository;
pub use role_repo_impl::PgRoleRepository;
pub use telegram_user_repo_impl::PgTelegramUserRepository;
