//! # Wallet Handlers
//!
//! Handlers for the "Connect Wallet" and "Disconnect" buttons.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, Notification, StreamQuery};
use crate::core::AppError;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;

/// Handle wallet connect button click
///
/// Internal handler function - use [`crate::app::App::handle_wallet_connect_click`] instead.
pub(crate) fn handle_wallet_connect_click(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let connector = {
        let mut state = state.write();
        if state.connecting {
            tracing::debug!("Connect already in flight");
            return;
        }
        state.connecting = true;
        state.services.connector.clone()
    };

    tracing::info!("Requesting wallet access");
    tokio::spawn(async move {
        let result = connector.activate().await.map_err(AppError::from);
        let _ = event_tx.send(AppEvent::WalletConnected(result)).await;
    });
}

/// Handle wallet disconnect button click
///
/// Internal handler function - use [`crate::app::App::handle_wallet_disconnect_click`] instead.
pub(crate) fn handle_wallet_disconnect_click(state: Arc<RwLock<AppState>>) {
    let mut state = state.write();
    let connector = state.services.connector.clone();
    connector.deactivate();
    state.connection = connector.state();
    state.streams = StreamQuery::default();
    state.pending_actions.clear();
    state.last_streams_fetch = None;
    state.notify(Notification::info("Wallet disconnected"));
}
