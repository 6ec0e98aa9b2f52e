//! # Event Handler
//!
//! Handles async event results from background tasks, updating application state accordingly.
//!
//! Every handler takes the write lock for the state change only and releases it before
//! spawning follow-up work (a stream refresh after a connect or a confirmed transaction).

use crate::app::state::{FormState, Notification, StreamAction, StreamLists, StreamQuery};
use crate::app::{tasks, App, AppEvent};
use crate::core::AppError;
use alloy_primitives::{Address, B256, U256};
use lib_evm::{ConnectionState, CreateStreamStage, CreateStreamStep};
use shared::utils::{format_address, truncate_address};

/// Trait for event handling implementation
pub(crate) trait AppEventHandler {
    fn handle_event_impl(&mut self, event: AppEvent);
}

impl AppEventHandler for App {
    fn handle_event_impl(&mut self, event: AppEvent) {
        tracing::debug!(event = event.kind(), "Handling event");

        match event {
            AppEvent::WalletConnected(result) => self.handle_wallet_connected(result),
            AppEvent::WalletChanged(result) => self.handle_wallet_changed(result),
            AppEvent::StreamsLoaded { account, result } => self.handle_streams_loaded(account, result),
            AppEvent::CreateStreamStage(stage) => self.handle_create_stream_stage(stage),
            AppEvent::CreateStreamFinished(result) => self.handle_create_stream_finished(result),
            AppEvent::StreamActionFinished {
                stream_id,
                action,
                result,
            } => self.handle_stream_action_finished(stream_id, action, result),
        }
    }
}

fn short(account: Option<Address>) -> String {
    account
        .map(|a| truncate_address(&a.to_string()))
        .unwrap_or_else(|| "-".to_string())
}

impl App {
    /// Replace the connection snapshot. Returns whether the streams must be re-queried.
    fn apply_connection(&mut self, connection: ConnectionState) -> bool {
        let mut state = self.state.write();
        let previous = state.account();
        state.connection = connection;
        let current = state.account();

        if current != previous || current.is_none() {
            state.streams = StreamQuery::default();
            state.pending_actions.clear();
        }
        current.is_some() && current != previous
    }

    fn handle_wallet_connected(&mut self, result: Result<ConnectionState, AppError>) {
        tracing::info!(event = "WalletConnected", success = result.is_ok(), "Processing wallet connection");
        self.state.write().connecting = false;

        match result {
            Ok(connection) => {
                let account = connection.account;
                let chain_id = connection.chain_id;
                let refetch = self.apply_connection(connection);
                self.state.write().notify(Notification::success(format!(
                    "Wallet connected: {} (chain {})",
                    short(account),
                    chain_id.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string())
                )));
                if refetch {
                    tasks::streams::fetch_streams(self.state.clone(), self.event_tx.clone());
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Wallet connection failed");
                let notification = if e.is_user_rejection() {
                    Notification::warning("Connection request rejected in the wallet")
                } else {
                    Notification::error(e.to_string())
                };
                self.state.write().notify(notification);
            }
        }
    }

    fn handle_wallet_changed(&mut self, result: Result<ConnectionState, AppError>) {
        match result {
            Ok(connection) => {
                let was_active = self.state.read().connection.active;
                let now_active = connection.active;
                let refetch = self.apply_connection(connection);
                if was_active && !now_active {
                    self.state.write().notify(Notification::warning("Wallet disconnected"));
                }
                if refetch {
                    tasks::streams::fetch_streams(self.state.clone(), self.event_tx.clone());
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Wallet change could not be applied");
                // The connector has already reset itself; mirror whatever it holds now.
                let connection = self.state.read().services.connector.state();
                self.apply_connection(connection);
                self.state.write().notify(Notification::error(e.to_string()));
            }
        }
    }

    fn handle_streams_loaded(&mut self, account: Address, result: Result<StreamLists, AppError>) {
        let mut state = self.state.write();
        if state.account() != Some(account) {
            tracing::debug!(account = %account, "Dropping streams for a stale account");
            return;
        }

        state.streams.loading = false;
        match result {
            Ok(lists) => {
                tracing::info!(
                    account = %account,
                    sent = lists.sent.len(),
                    received = lists.received.len(),
                    "Streams updated"
                );
                state.streams.error = None;
                state.streams.data = Some(lists);
            }
            Err(e) => {
                let message = e.to_string();
                tracing::error!(account = %account, error = %message, "Stream query failed");
                // Periodic refreshes keep failing the same way; toast only on a new error.
                if state.streams.error.as_deref() != Some(message.as_str()) {
                    state.notify(Notification::error(message.clone()));
                }
                state.streams.error = Some(message);
            }
        }
    }

    fn handle_create_stream_stage(&mut self, stage: CreateStreamStage) {
        let mut state = self.state.write();
        if let CreateStreamStage::Approved { approve_tx } = &stage {
            state.notify(Notification::info(format!(
                "Token approved ({}), creating stream...",
                format_address(&approve_tx.to_string(), 10, 4)
            )));
        }
        state.create_stage = stage;
    }

    fn handle_create_stream_finished(&mut self, result: Result<B256, AppError>) {
        match result {
            Ok(create_tx) => {
                {
                    let mut state = self.state.write();
                    state.form = FormState::default();
                    state.notify(Notification::success(format!(
                        "Stream created ({})",
                        format_address(&create_tx.to_string(), 10, 4)
                    )));
                }
                tasks::streams::fetch_streams(self.state.clone(), self.event_tx.clone());
            }
            Err(e) => {
                let mut state = self.state.write();
                let message = e.to_string();
                // The saga reports its own Failed stage; this covers a task that died mid-flow.
                if state.create_stage.is_running() {
                    let step = match &state.create_stage {
                        CreateStreamStage::Approving => CreateStreamStep::Approve,
                        _ => CreateStreamStep::Create,
                    };
                    state.create_stage = CreateStreamStage::Failed {
                        step,
                        message: message.clone(),
                    };
                }
                if let AppError::Validation(_) = e {
                    state.form.error = Some(message.clone());
                }
                state.notify(if e.is_user_rejection() {
                    Notification::warning(format!("Stream not created: {}", message))
                } else {
                    Notification::error(message)
                });
            }
        }
    }

    fn handle_stream_action_finished(&mut self, stream_id: U256, action: StreamAction, result: Result<B256, AppError>) {
        let confirmed = {
            let mut state = self.state.write();
            state.pending_actions.remove(&(stream_id, action));
            match result {
                Ok(tx) => {
                    tracing::info!(stream_id = %stream_id, ?action, tx_hash = %tx, "Stream action confirmed");
                    state.notify(Notification::success(format!("Stream #{} {}", stream_id, action.past_tense())));
                    true
                }
                Err(e) => {
                    tracing::error!(stream_id = %stream_id, ?action, error = %e, "Stream action failed");
                    state.notify(Notification::error(format!("{} #{}: {}", action.label(), stream_id, e)));
                    false
                }
            }
        };

        if confirmed {
            tasks::streams::fetch_streams(self.state.clone(), self.event_tx.clone());
        }
    }
}
