//! # Wallet Provider
//!
//! [`Provider`] is the seam between the terminal and whatever holds the user's keys.
//! [`HttpProvider`] talks JSON-RPC to a wallet endpoint (Frame, a dev node with
//! unlocked accounts, an EIP-1193 bridge); tests substitute an in-memory mock.
//!
//! Each method maps transport failures into the error kind its caller cares about:
//! account access failures are [`ConnectionError`]s, `eth_sendTransaction` failures
//! are submission errors.
//!
//! `eth_requestAccounts` and `eth_sendTransaction` stay open until the user answers in
//! the wallet, so the HTTP timeout does not apply to them; only the optional prompt
//! timeout does.

use crate::rpc::{RpcClient, RpcError};
use crate::types::{TransactionReceipt, TransactionRequest};
use alloy_primitives::{Address, B256, U64};
use async_trait::async_trait;
use lib_core::{AppError, ConnectionError, Result};
use serde_json::json;
use std::time::Duration;

/// Wallet/node operations used by the client.
#[async_trait]
pub trait Provider: Send + Sync {
    /// `eth_requestAccounts`: may prompt the user.
    async fn request_accounts(&self) -> Result<Vec<Address>>;

    /// `eth_accounts`: already-authorized accounts, never prompts.
    async fn accounts(&self) -> Result<Vec<Address>>;

    /// `eth_chainId`.
    async fn chain_id(&self) -> Result<u64>;

    /// `eth_sendTransaction`: the wallet signs and broadcasts, returning the hash.
    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256>;

    /// `eth_getTransactionReceipt`: `None` while pending.
    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>>;
}

/// [`Provider`] over JSON-RPC/HTTP.
#[derive(Debug)]
pub struct HttpProvider {
    rpc: RpcClient,
}

impl HttpProvider {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let rpc = RpcClient::new(url, timeout).map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self { rpc })
    }

    /// Give up on an unanswered wallet prompt after `prompt_timeout` (`None`: never).
    pub fn with_prompt_timeout(self, prompt_timeout: Option<Duration>) -> Self {
        Self {
            rpc: self.rpc.with_prompt_timeout(prompt_timeout),
        }
    }

    pub fn url(&self) -> &str {
        self.rpc.url()
    }
}

fn connection_error(err: RpcError) -> AppError {
    if err.is_user_rejection() {
        ConnectionError::Rejected.into()
    } else if err.is_transport() {
        ConnectionError::Unreachable(err.to_string()).into()
    } else {
        AppError::Rpc(err.to_string())
    }
}

#[async_trait]
impl Provider for HttpProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.rpc
            .request_prompting("eth_requestAccounts", json!([]))
            .await
            .map_err(connection_error)
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        self.rpc
            .request("eth_accounts", json!([]))
            .await
            .map_err(connection_error)
    }

    async fn chain_id(&self) -> Result<u64> {
        let id: U64 = self
            .rpc
            .request("eth_chainId", json!([]))
            .await
            .map_err(connection_error)?;
        Ok(id.to::<u64>())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256> {
        self.rpc
            .request_prompting("eth_sendTransaction", json!([tx]))
            .await
            .map_err(|e| {
                if e.is_user_rejection() {
                    AppError::TransactionSubmission("rejected in wallet".to_string())
                } else {
                    AppError::TransactionSubmission(e.to_string())
                }
            })
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        Ok(self
            .rpc
            .request("eth_getTransactionReceipt", json!([hash]))
            .await?)
    }
}
