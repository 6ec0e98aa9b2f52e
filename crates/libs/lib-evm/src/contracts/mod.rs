//! # Contract Callers
//!
//! Typed wrappers for the two contracts the client writes to. Every call is encoded
//! with `alloy-sol-types`, sent through the connected signer and awaited until mined.

pub mod abi;
pub mod erc20;
pub mod sablier;

pub use erc20::Erc20;
pub use sablier::Sablier;

use crate::pending::{PendingTransaction, DEFAULT_POLL_INTERVAL};
use crate::signer::ProviderOrSigner;
use crate::types::TransactionReceipt;
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;
use lib_core::Result;
use std::time::Duration;

/// Sends encoded calls and waits for their receipts.
#[derive(Clone, Debug)]
pub struct ContractCaller {
    handle: ProviderOrSigner,
    poll_interval: Duration,
    timeout: Option<Duration>,
}

impl ContractCaller {
    pub fn new(handle: ProviderOrSigner) -> Self {
        Self {
            handle,
            poll_interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }

    /// Receipt polling cadence and optional give-up time.
    pub fn with_confirmation(mut self, poll_interval: Duration, timeout: Option<Duration>) -> Self {
        self.poll_interval = poll_interval;
        self.timeout = timeout;
        self
    }

    pub fn handle(&self) -> &ProviderOrSigner {
        &self.handle
    }

    /// Encode and send `call` to `to`.
    pub async fn submit<C: SolCall>(&self, to: Address, call: &C) -> Result<PendingTransaction> {
        let data = Bytes::from(call.abi_encode());
        tracing::debug!(to = %to, function = C::SIGNATURE, "Submitting contract call");
        let hash = self.handle.send_transaction(to, data).await?;
        Ok(PendingTransaction::new(self.handle.provider().clone(), hash)
            .with_poll_interval(self.poll_interval)
            .with_timeout(self.timeout))
    }

    /// [`submit`](Self::submit) and wait for the receipt.
    pub async fn execute<C: SolCall>(&self, to: Address, call: &C) -> Result<TransactionReceipt> {
        self.submit(to, call).await?.wait().await
    }
}
