//! Streaming contract calls.

use super::abi::ISablier;
use super::ContractCaller;
use crate::types::TransactionReceipt;
use alloy_primitives::{Address, U256};
use lib_core::{Result, StreamTerms};

/// Sablier deployment on the connected chain.
#[derive(Clone, Debug)]
pub struct Sablier {
    address: Address,
    caller: ContractCaller,
}

impl Sablier {
    pub fn new(address: Address, caller: ContractCaller) -> Self {
        Self { address, caller }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    #[tracing::instrument(skip(self, terms), fields(
        sablier = %self.address,
        recipient = %terms.recipient,
        deposit = %terms.deposit,
    ))]
    pub async fn create_stream(&self, terms: &StreamTerms) -> Result<TransactionReceipt> {
        let call = ISablier::createStreamCall {
            recipient: terms.recipient,
            deposit: terms.deposit,
            token_address: terms.token,
            start_time: U256::from(terms.start_time),
            stop_time: U256::from(terms.stop_time),
        };
        self.caller.execute(self.address, &call).await
    }

    #[tracing::instrument(skip(self), fields(sablier = %self.address))]
    pub async fn cancel(&self, stream_id: U256) -> Result<TransactionReceipt> {
        self.caller
            .execute(self.address, &ISablier::cancelCall { stream_id })
            .await
    }

    #[tracing::instrument(skip(self), fields(sablier = %self.address))]
    pub async fn withdraw(&self, stream_id: U256) -> Result<TransactionReceipt> {
        self.caller
            .execute(self.address, &ISablier::withdrawCall { stream_id })
            .await
    }
}
