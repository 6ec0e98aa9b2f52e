//! # Wallet Tasks
//!
//! Startup reconnection and the provider watcher.

use crate::app::events::AppEvent;
use crate::app::state::AppState;
use crate::core::AppError;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Try to restore an already-authorized wallet session without prompting.
///
/// Sends `WalletChanged` only when an account was restored.
pub(crate) fn connect_eagerly(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let connector = state.read().services.connector.clone();

    tokio::spawn(async move {
        if connector.try_eager().await {
            let _ = event_tx.send(AppEvent::WalletChanged(Ok(connector.state()))).await;
        } else {
            tracing::debug!("No authorized wallet session to restore");
        }
    });
}

/// Start polling the wallet for account and chain changes.
pub(crate) fn start_wallet_watcher(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) -> JoinHandle<()> {
    let (connector, interval) = {
        let state = state.read();
        (state.services.connector.clone(), state.settings.wallet_watch_interval)
    };

    tracing::debug!(interval_ms = interval.as_millis() as u64, "Starting wallet watcher");
    connector.spawn_watcher(interval, move |result| {
        let event = AppEvent::WalletChanged(result.map_err(AppError::from));
        if event_tx.try_send(event).is_err() {
            tracing::debug!("Event channel closed, dropping wallet change");
        }
    })
}
