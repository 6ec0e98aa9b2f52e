//! In-memory stand-ins for the wallet, the indexer and the contracts.

use crate::app::AppSettings;
use crate::core::error::{AppError, Result};
use crate::core::service::{ContractsFactory, IndexerService, Services};
use alloy_primitives::{address, Address, B256, U256, U64};
use async_trait::async_trait;
use lib_core::StreamTerms;
use lib_evm::{
    ConnectionState, InjectedConnector, Provider, StreamContracts, TransactionReceipt, TransactionRequest,
    WalletConnector,
};
use parking_lot::Mutex;
use shared::dto::streams::{RecipientStream, SenderStream, StreamsData};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

pub(crate) const ACCOUNT: Address = address!("0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2");
pub(crate) const RECIPIENT: Address = address!("0xb0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0");
pub(crate) const TOKEN: Address = address!("0x7070707070707070707070707070707070707070");

/// Wallet endpoint. Access must be requested unless `authorized` is set.
#[derive(Default)]
pub(crate) struct MockWallet {
    pub accounts: Mutex<Vec<Address>>,
    pub chain_id: Mutex<u64>,
    pub authorized: Mutex<bool>,
    pub reject: Mutex<bool>,
}

impl MockWallet {
    pub fn new(accounts: Vec<Address>, chain_id: u64) -> Self {
        Self {
            accounts: Mutex::new(accounts),
            chain_id: Mutex::new(chain_id),
            ..Default::default()
        }
    }

    pub fn authorized(self) -> Self {
        *self.authorized.lock() = true;
        self
    }

    pub fn rejecting(self) -> Self {
        *self.reject.lock() = true;
        self
    }
}

#[async_trait]
impl Provider for MockWallet {
    async fn request_accounts(&self) -> lib_core::Result<Vec<Address>> {
        if *self.reject.lock() {
            return Err(lib_core::ConnectionError::Rejected.into());
        }
        *self.authorized.lock() = true;
        Ok(self.accounts.lock().clone())
    }

    async fn accounts(&self) -> lib_core::Result<Vec<Address>> {
        if *self.authorized.lock() {
            Ok(self.accounts.lock().clone())
        } else {
            Ok(Vec::new())
        }
    }

    async fn chain_id(&self) -> lib_core::Result<u64> {
        Ok(*self.chain_id.lock())
    }

    async fn send_transaction(&self, _tx: &TransactionRequest) -> lib_core::Result<B256> {
        Err(lib_core::AppError::TransactionSubmission("mock wallet does not sign".to_string()))
    }

    async fn transaction_receipt(&self, _hash: B256) -> lib_core::Result<Option<TransactionReceipt>> {
        Ok(None)
    }
}

/// Indexer returning a fixed response and counting queries.
pub(crate) struct MockIndexer {
    pub response: Mutex<Result<StreamsData>>,
    pub calls: AtomicUsize,
}

impl MockIndexer {
    pub fn new(response: Result<StreamsData>) -> Self {
        Self {
            response: Mutex::new(response),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IndexerService for MockIndexer {
    async fn fetch_streams(&self, _account: Address) -> Result<StreamsData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.response.lock().clone()
    }
}

/// One stream sent by [`ACCOUNT`] and one received by it.
pub(crate) fn sample_streams() -> StreamsData {
    StreamsData {
        sender_streams: vec![SenderStream {
            id: "7".to_string(),
            recipient: RECIPIENT.to_string(),
            deposit: "100000000000000000000".to_string(),
            start_time: "1600000000".to_string(),
            stop_time: "1600000100".to_string(),
        }],
        recipient_streams: vec![RecipientStream {
            id: "9".to_string(),
            sender: RECIPIENT.to_string(),
            deposit: "5000".to_string(),
            start_time: "1600000000".to_string(),
            stop_time: "1600000050".to_string(),
        }],
    }
}

/// Records every contract call; receipts are returned immediately.
#[derive(Default)]
pub(crate) struct MockContracts {
    pub calls: Mutex<Vec<String>>,
    pub fail_create: bool,
    pub fail_actions: bool,
}

impl MockContracts {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn receipt(&self) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: B256::with_last_byte(self.calls.lock().len() as u8),
            block_number: Some(U64::from(1)),
            status: Some(U64::from(1)),
        }
    }
}

#[async_trait]
impl StreamContracts for MockContracts {
    async fn approve(&self, token: Address, amount: U256) -> lib_core::Result<TransactionReceipt> {
        self.calls.lock().push(format!("approve {} {}", token, amount));
        Ok(self.receipt())
    }

    async fn create_stream(&self, terms: &StreamTerms) -> lib_core::Result<TransactionReceipt> {
        self.calls.lock().push(format!("create {} {}", terms.recipient, terms.deposit));
        if self.fail_create {
            return Err(lib_core::AppError::TransactionConfirmation("reverted".to_string()));
        }
        Ok(self.receipt())
    }

    async fn cancel(&self, stream_id: U256) -> lib_core::Result<TransactionReceipt> {
        self.calls.lock().push(format!("cancel {}", stream_id));
        if self.fail_actions {
            return Err(lib_core::AppError::TransactionSubmission("rejected in wallet".to_string()));
        }
        Ok(self.receipt())
    }

    async fn withdraw(&self, stream_id: U256) -> lib_core::Result<TransactionReceipt> {
        self.calls.lock().push(format!("withdraw {}", stream_id));
        if self.fail_actions {
            return Err(lib_core::AppError::TransactionSubmission("rejected in wallet".to_string()));
        }
        Ok(self.receipt())
    }
}

/// Hands out the same [`MockContracts`] for any active connection.
pub(crate) struct MockContractsFactory(pub Arc<MockContracts>);

impl ContractsFactory for MockContractsFactory {
    fn contracts(&self, connection: &ConnectionState) -> Result<Arc<dyn StreamContracts>> {
        if !connection.active {
            return Err(AppError::Connection("wallet is not connected".to_string()));
        }
        Ok(self.0.clone())
    }
}

/// Settings with polling pushed out of the way of the test.
pub(crate) fn test_settings() -> AppSettings {
    AppSettings {
        token_address: TOKEN,
        streams_poll_interval: None,
        wallet_watch_interval: Duration::from_secs(3600),
    }
}

pub(crate) fn services(
    wallet: Option<Arc<MockWallet>>,
    indexer: Arc<MockIndexer>,
    contracts: Arc<MockContracts>,
) -> Services {
    let provider = wallet.map(|wallet| wallet as Arc<dyn Provider>);
    Services {
        connector: Arc::new(WalletConnector::new(InjectedConnector::new(provider, vec![1, 4]))),
        indexer,
        contracts: Arc::new(MockContractsFactory(contracts)),
    }
}
