//! # Stream Action Tasks
//!
//! Cancel and withdraw on an existing stream. The row stays disabled until the
//! transaction confirms or fails.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, Notification, StreamAction};
use crate::core::AppError;
use alloy_primitives::U256;
use async_channel::Sender;
use parking_lot::RwLock;
use std::sync::Arc;

pub(crate) fn run_stream_action(
    state: Arc<RwLock<AppState>>,
    event_tx: Sender<AppEvent>,
    stream_id: U256,
    action: StreamAction,
) {
    let contracts = {
        let mut state = state.write();
        if state.is_action_pending(stream_id, action) {
            return;
        }
        match state.services.contracts.contracts(&state.connection) {
            Ok(contracts) => {
                state.pending_actions.insert((stream_id, action));
                contracts
            }
            Err(e) => {
                tracing::warn!(stream_id = %stream_id, ?action, error = %e, "Stream action refused");
                state.notify(Notification::error(e.to_string()));
                return;
            }
        }
    };

    tracing::info!(stream_id = %stream_id, ?action, "Submitting stream action");
    tokio::spawn(async move {
        let receipt = match action {
            StreamAction::Cancel => contracts.cancel(stream_id).await,
            StreamAction::Withdraw => contracts.withdraw(stream_id).await,
        };
        let result = receipt
            .map(|receipt| receipt.transaction_hash)
            .map_err(AppError::from);
        let _ = event_tx
            .send(AppEvent::StreamActionFinished {
                stream_id,
                action,
                result,
            })
            .await;
    });
}
