//! # Application Events
//!
//! Event types for async task communication between background tasks and the main thread.

use crate::app::state::{StreamAction, StreamLists};
use crate::core::AppError;
use alloy_primitives::{Address, B256, U256};
use lib_evm::{ConnectionState, CreateStreamStage};

/// Async task results sent to main thread
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// "Connect Wallet" finished
    WalletConnected(Result<ConnectionState, AppError>),
    /// Eager reconnect or a provider account/chain change
    WalletChanged(Result<ConnectionState, AppError>),
    /// Indexer query finished for `account`
    StreamsLoaded {
        account: Address,
        result: Result<StreamLists, AppError>,
    },
    /// Create-stream saga moved to a new stage
    CreateStreamStage(CreateStreamStage),
    /// Create-stream saga finished; carries the createStream transaction hash
    CreateStreamFinished(Result<B256, AppError>),
    /// Cancel or withdraw finished
    StreamActionFinished {
        stream_id: U256,
        action: StreamAction,
        result: Result<B256, AppError>,
    },
}

impl AppEvent {
    /// Short name for logging
    pub fn kind(&self) -> &'static str {
        match self {
            AppEvent::WalletConnected(_) => "WalletConnected",
            AppEvent::WalletChanged(_) => "WalletChanged",
            AppEvent::StreamsLoaded { .. } => "StreamsLoaded",
            AppEvent::CreateStreamStage(_) => "CreateStreamStage",
            AppEvent::CreateStreamFinished(_) => "CreateStreamFinished",
            AppEvent::StreamActionFinished { .. } => "StreamActionFinished",
        }
    }
}
