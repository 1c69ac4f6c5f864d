//! Long-poll loop feeding updates to concurrent handlers

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

use tgmenu_bot::{handle_update, BotState, TelegramClient};

const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Poll forever. Each update runs in its own task; at most
/// `max_concurrent` handlers run at once.
pub async fn run(
    client: Arc<TelegramClient>,
    state: Arc<BotState>,
    poll_timeout_secs: u32,
    max_concurrent: usize,
) {
    let permits = Arc::new(Semaphore::new(max_concurrent.max(1)));
    let mut offset: i32 = 0;

    info!("Polling for updates (max {} concurrent handlers)", max_concurrent.max(1));

    loop {
        let updates = match client.get_updates(offset, poll_timeout_secs).await {
            Ok(updates) => updates,
            Err(e) => {
                warn!("getUpdates failed: {}", e);
                tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                continue;
            }
        };

        for update in updates {
            // Update ids fit in i32 on the wire; teloxide widens them to u32
            offset = offset.max(update.id.0 as i32 + 1);

            let Ok(permit) = permits.clone().acquire_owned().await else {
                warn!("Handler semaphore closed, stopping poll loop");
                return;
            };

            let state = state.clone();
            tokio::spawn(async move {
                let _permit = permit;
                debug!("Handling update {}", update.id.0);
                handle_update(&state, update).await;
            });
        }
    }
}
