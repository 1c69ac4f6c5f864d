mod health;
mod poller;

use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::PgPool;
use tracing::{error, info};

use tgmenu_bot::{BotState, TelegramClient};
use tgmenu_core::repositories::{MenuRepository, RoleRepository, TelegramUserRepository};
use tgmenu_infrastructure::{
    create_pool, load_snapshot, run_migrations, PgMenuRepository, PgRoleRepository,
    PgTelegramUserRepository,
};
use tgmenu_shared::config::{AppConfig, StoreBackend};

use crate::health::HealthState;

/// Read ports over whichever backend is configured.
struct Store {
    menus: Arc<dyn MenuRepository>,
    roles: Arc<dyn RoleRepository>,
    users: Arc<dyn TelegramUserRepository>,
    db: Option<PgPool>,
}

async fn build_store(config: &AppConfig) -> anyhow::Result<Store> {
    match config.store.backend {
        StoreBackend::Postgres => {
            info!("Connecting to database...");
            let pool = create_pool(
                &config.database.url,
                config.database.max_connections,
                config.database.min_connections,
            )
            .await?;
            info!("Database connection established.");

            if config.database.run_migrations {
                run_migrations(&pool).await?;
            }

            Ok(Store {
                menus: Arc::new(PgMenuRepository::new(pool.clone())),
                roles: Arc::new(PgRoleRepository::new(pool.clone())),
                users: Arc::new(PgTelegramUserRepository::new(pool.clone())),
                db: Some(pool),
            })
        }
        StoreBackend::Snapshot => {
            let store = Arc::new(load_snapshot(&config.store.snapshot_path).await?);
            Ok(Store {
                menus: store.clone(),
                roles: store.clone(),
                users: store,
                db: None,
            })
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize telemetry; the guard flushes file logs on exit
    let _log_guard = tgmenu_shared::telemetry::init_telemetry(&config.logging);

    info!("{} starting ({})...", config.app.name, config.app.env);

    if config.telegram.bot_token.is_empty() {
        error!("telegram.bot_token is not set");
        std::process::exit(1);
    }

    let store = build_store(&config).await?;
    info!("Store backend: {:?}", config.store.backend);

    let client = Arc::new(TelegramClient::new(&config.telegram)?);
    let state = Arc::new(BotState::new(
        client.clone(),
        store.menus,
        store.roles,
        store.users,
        config.menu,
        config.media.clone(),
    ));

    if config.health.enabled {
        let host: std::net::IpAddr = config.health.host.parse()?;
        let addr = SocketAddr::from((host, config.health.port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let app = health::router(HealthState { db: store.db });
        info!("Health endpoint listening on {}", addr);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Health server stopped: {}", e);
            }
        });
    }

    tokio::select! {
        _ = poller::run(
            client,
            state,
            config.telegram.poll_timeout_secs,
            config.telegram.max_concurrent_updates,
        ) => {}
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received, stopping");
        }
    }

    Ok(())
}
