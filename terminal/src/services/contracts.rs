//! # Contracts Factory
//!
//! Builds the live [`StreamContracts`] for whatever the wallet is connected to. Each
//! action resolves a fresh client so a chain or account switch is picked up without
//! any cache to invalidate.

use crate::core::error::{AppError, Result};
use crate::core::service::ContractsFactory;
use lib_core::AddressBook;
use lib_evm::{ConnectionState, ContractCaller, SablierClient, StreamContracts};
use std::sync::Arc;
use std::time::Duration;

/// Resolves the Sablier deployment by chain id and wires it to the connected signer.
pub struct SablierContractsFactory {
    address_book: AddressBook,
    poll_interval: Duration,
    timeout: Option<Duration>,
}

impl SablierContractsFactory {
    pub fn new(address_book: AddressBook, poll_interval: Duration, timeout: Option<Duration>) -> Self {
        Self {
            address_book,
            poll_interval,
            timeout,
        }
    }
}

impl ContractsFactory for SablierContractsFactory {
    fn contracts(&self, connection: &ConnectionState) -> Result<Arc<dyn StreamContracts>> {
        let handle = connection
            .signer()
            .filter(|_| connection.active)
            .ok_or_else(|| AppError::Connection("wallet is not connected".to_string()))?;
        let chain_id = connection
            .chain_id
            .ok_or_else(|| AppError::Connection("wallet did not report a chain id".to_string()))?;
        let sablier = self.address_book.sablier(chain_id)?;

        tracing::debug!(chain_id, sablier = %sablier, signer = handle.is_signer(), "Resolved stream contracts");
        let caller = ContractCaller::new(handle).with_confirmation(self.poll_interval, self.timeout);
        Ok(Arc::new(SablierClient::new(sablier, caller)))
    }
}
