//! # Create-Stream Task
//!
//! Validates the form, derives the stream terms and runs the approve/create saga on
//! the runtime. Every saga stage is forwarded to the UI as it happens.

use crate::app::events::AppEvent;
use crate::app::state::{AppState, Notification};
use crate::core::{AppError, Result};
use async_channel::Sender;
use lib_core::StreamTerms;
use lib_evm::{CreateStreamSaga, CreateStreamStage, StreamContracts};
use parking_lot::RwLock;
use std::sync::Arc;

/// Check the form and build the `createStream` arguments.
pub(crate) fn prepare_terms(state: &AppState) -> Result<StreamTerms> {
    let form = &state.form;
    let start = form
        .start
        .to_unix_secs()
        .ok_or_else(|| AppError::Validation("Start time does not exist in the local timezone".to_string()))?;
    let stop = form
        .stop
        .to_unix_secs()
        .ok_or_else(|| AppError::Validation("Stop time does not exist in the local timezone".to_string()))?;

    StreamTerms::prepare(&form.deposit, &form.recipient, state.settings.token_address, start, stop)
        .map_err(AppError::from)
}

/// Handle the "Create Stream" button.
///
/// Input and connection problems are reported synchronously; nothing is spawned for them.
pub(crate) fn create_stream(state: Arc<RwLock<AppState>>, event_tx: Sender<AppEvent>) {
    let prepared: Result<(StreamTerms, Arc<dyn StreamContracts>)> = {
        let state = state.read();
        if state.create_stage.is_running() {
            tracing::debug!("Create-stream flow already running");
            return;
        }
        if state.account().is_none() {
            Err(AppError::Connection("connect a wallet first".to_string()))
        } else {
            prepare_terms(&state).and_then(|terms| {
                let contracts = state.services.contracts.contracts(&state.connection)?;
                Ok((terms, contracts))
            })
        }
    };

    let (terms, contracts) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::warn!(error = %e, "Create stream refused");
            let mut state = state.write();
            if let AppError::Validation(message) = &e {
                state.form.error = Some(message.clone());
            }
            state.notify(Notification::error(e.to_string()));
            return;
        }
    };

    tracing::info!(
        recipient = %terms.recipient,
        deposit = %terms.deposit,
        remainder = %terms.remainder,
        duration_secs = terms.duration(),
        "Starting create-stream flow"
    );
    {
        let mut state = state.write();
        state.form.error = None;
        // Disable the button before the first stage event arrives.
        state.create_stage = CreateStreamStage::Approving;
    }

    tokio::spawn(async move {
        let mut saga = CreateStreamSaga::new(contracts);
        let stage_tx = event_tx.clone();
        let result = saga
            .run(&terms, move |stage| {
                let _ = stage_tx.try_send(AppEvent::CreateStreamStage(stage.clone()));
            })
            .await
            .map(|outcome| outcome.create.transaction_hash)
            .map_err(AppError::from);
        let _ = event_tx.send(AppEvent::CreateStreamFinished(result)).await;
    });
}
