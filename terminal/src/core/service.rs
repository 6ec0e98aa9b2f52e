//! # Service Traits
//!
//! Traits for dependency injection, enabling better testability and modularity.
//!
//! The app talks to the outside world through three seams:
//!
//! - [`IndexerService`]: reads streams from the GraphQL indexer
//! - [`ContractsFactory`]: builds contract callers for the current connection
//! - [`lib_evm::WalletConnector`]: owns the wallet connection (a concrete type; its
//!   [`lib_evm::Provider`] is the mockable part)

use crate::core::error::Result;
use alloy_primitives::Address;
use async_trait::async_trait;
use lib_evm::{ConnectionState, StreamContracts, WalletConnector};
use shared::dto::streams::StreamsData;
use std::sync::Arc;

/// Read access to the stream indexer.
#[async_trait]
pub trait IndexerService: Send + Sync {
    /// Streams sent and received by `account`.
    async fn fetch_streams(&self, account: Address) -> Result<StreamsData>;
}

/// Contract callers bound to a connection.
///
/// A fresh caller is built per action so it always uses the current account and chain.
pub trait ContractsFactory: Send + Sync {
    fn contracts(&self, connection: &ConnectionState) -> Result<Arc<dyn StreamContracts>>;
}

/// Everything background tasks need, cloned into each task.
#[derive(Clone)]
pub struct Services {
    pub connector: Arc<WalletConnector>,
    pub indexer: Arc<dyn IndexerService>,
    pub contracts: Arc<dyn ContractsFactory>,
}
