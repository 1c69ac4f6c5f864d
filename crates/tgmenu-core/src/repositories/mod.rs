//! Repository traits (ports)

pub mod menu_repository;
pub mod role_repository;
pub mod telegram_user_repository;
pub mod memory;

pub use menu_repository::MenuRepository;
pub use role_repository::RoleRepository;
pub use telegram_user_repository::TelegramUserRepository;
pub use memory::InMemoryMenuStore;

#[cfg(test)]
pub use menu_repository::MockMenuRepository;
#[cfg(test)]
pub use role_repository::MockRoleRepository;
#[cfg(test)]
pub use telegram_user_repository::MockTelegramUserRepository;
