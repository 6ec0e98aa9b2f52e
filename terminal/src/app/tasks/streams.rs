//! # Stream Query Tasks
//!
//! Loads the connected account's streams from the indexer.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, StreamLists};
use crate::core::{AppError, Result};
use alloy_primitives::Address;
use async_channel::Sender;
use lib_core::Stream;
use parking_lot::RwLock;
use shared::dto::streams::StreamsData;
use std::sync::Arc;
use std::time::Instant;

/// Decode indexer rows into the two lists shown on screen.
pub(crate) fn lists_from_data(account: Address, data: &StreamsData) -> Result<StreamLists> {
    let decode = |e: lib_core::AppError| AppError::Query(e.to_string());
    let sent = data
        .sender_streams
        .iter()
        .map(|row| Stream::from_sender_row(account, row).map_err(decode))
        .collect::<Result<Vec<_>>>()?;
    let received = data
        .recipient_streams
        .iter()
        .map(|row| Stream::from_recipient_row(account, row).map_err(decode))
        .collect::<Result<Vec<_>>>()?;
    Ok(StreamLists { sent, received })
}

/// Query the indexer for the connected account.
///
/// No-op without an active account or while a query for the same account is running.
pub(crate) fn fetch_streams(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let (account, indexer) = {
        let mut state = state.write();
        let account = match state.account() {
            Some(account) => account,
            None => return,
        };
        if state.streams.loading && state.streams.account == Some(account) {
            return;
        }
        if state.streams.account != Some(account) {
            state.streams.data = None;
            state.streams.error = None;
        }
        state.streams.loading = true;
        state.streams.account = Some(account);
        state.last_streams_fetch = Some(Instant::now());
        (account, state.services.indexer.clone())
    };

    tracing::debug!(account = %account, "Fetching streams");
    tokio::spawn(async move {
        let result = indexer
            .fetch_streams(account)
            .await
            .and_then(|data| lists_from_data(account, &data));
        let _ = event_tx.send(AppEvent::StreamsLoaded { account, result }).await;
    });
}
