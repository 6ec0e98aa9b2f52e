//! ERC20 allowance.

use super::abi::IERC20;
use super::ContractCaller;
use crate::types::TransactionReceipt;
use alloy_primitives::{Address, U256};
use lib_core::Result;

/// The streamed token.
#[derive(Clone, Debug)]
pub struct Erc20 {
    address: Address,
    caller: ContractCaller,
}

impl Erc20 {
    pub fn new(address: Address, caller: ContractCaller) -> Self {
        Self { address, caller }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// `approve(spender, amount)`, awaited until mined.
    #[tracing::instrument(skip(self), fields(token = %self.address))]
    pub async fn approve(&self, spender: Address, amount: U256) -> Result<TransactionReceipt> {
        self.caller
            .execute(self.address, &IERC20::approveCall { spender, amount })
            .await
    }
}
