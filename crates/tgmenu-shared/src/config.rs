//! Configuration management

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use validator::Validate;

use crate::constants::{DEFAULT_BUTTONS_PER_ROW, DEFAULT_INITIAL_PAGE, DEFAULT_ITEMS_PER_PAGE};
use crate::error::AppError;

#[derive(Debug, Deserialize, Clone, Validate)]
pub struct AppConfig {
    pub app: AppSettings,
    pub telegram: TelegramSettings,
    pub store: StoreSettings,
    pub database: DatabaseSettings,
    #[validate(nested)]
    pub menu: MenuSettings,
    #[serde(default)]
    pub media: MediaSettings,
    pub health: HealthSettings,
    pub logging: LogSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramSettings {
    pub bot_token: String,
    pub api_base_url: String,
    /// Long-poll timeout passed to `getUpdates`
    pub poll_timeout_secs: u32,
    pub request_timeout_secs: u64,
    pub max_concurrent_updates: usize,
    pub max_requests_per_second: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StoreBackend {
    Postgres,
    Snapshot,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub backend: StoreBackend,
    /// JSON snapshot file, read when `backend = "snapshot"`
    pub snapshot_path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Apply bundled schema migrations on startup
    pub run_migrations: bool,
}

/// Layout constants of the menu keyboards.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Validate)]
pub struct MenuSettings {
    #[validate(range(min = 1, message = "items_per_page must be a positive integer"))]
    pub items_per_page: u32,

    #[validate(range(min = 1, message = "buttons_per_row must be a positive integer"))]
    pub buttons_per_row: u32,

    #[validate(range(min = 1, message = "initial_page must be a positive integer"))]
    pub initial_page: u32,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
            buttons_per_row: DEFAULT_BUTTONS_PER_ROW,
            initial_page: DEFAULT_INITIAL_PAGE,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct MediaSettings {
    /// Prefix for image references that are not absolute URLs
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HealthSettings {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogSettings {
    /// Directory for daily-rolling log files; stdout only when unset
    pub directory: Option<String>,
    pub file_prefix: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let config = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;
        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.name", "tgmenu-bot")?
            .set_default("telegram.bot_token", "")?
            .set_default("telegram.api_base_url", "https://api.telegram.org")?
            .set_default("telegram.poll_timeout_secs", 20)?
            .set_default("telegram.request_timeout_secs", 30)?
            .set_default("telegram.max_concurrent_updates", 64)?
            .set_default("telegram.max_requests_per_second", 30)?
            .set_default("store.backend", "postgres")?
            .set_default("store.snapshot_path", "data/menu_snapshot.json")?
            .set_default("database.url", "")?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 1)?
            .set_default("database.run_migrations", false)?
            .set_default("menu.items_per_page", DEFAULT_ITEMS_PER_PAGE)?
            .set_default("menu.buttons_per_row", DEFAULT_BUTTONS_PER_ROW)?
            .set_default("menu.initial_page", DEFAULT_INITIAL_PAGE)?
            .set_default("health.enabled", true)?
            .set_default("health.host", "127.0.0.1")?
            .set_default("health.port", 8080)?
            .set_default("logging.file_prefix", "tgmenu")
    }
}
