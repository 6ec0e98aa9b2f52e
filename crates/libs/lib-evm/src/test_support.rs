//! Test doubles: an in-process fake JSON-RPC endpoint and an in-memory [`Provider`].

use crate::provider::Provider;
use crate::types::{TransactionReceipt, TransactionRequest};
use alloy_primitives::{Address, B256, U64};
use async_trait::async_trait;
use axum::{routing::post, Json, Router};
use lib_core::{AppError, ConnectionError, Result};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

type Responder = dyn Fn(&str, &Value) -> std::result::Result<Value, (i64, String)> + Send + Sync;

/// Serve JSON-RPC on `127.0.0.1:<random>` and return its base URL.
pub(crate) async fn spawn_fake_rpc<F>(responder: F) -> String
where
    F: Fn(&str, &Value) -> std::result::Result<Value, (i64, String)> + Send + Sync + 'static,
{
    spawn_fake_rpc_delayed(Duration::ZERO, responder).await
}

/// Like [`spawn_fake_rpc`], answering every call after `delay`, as a wallet does while
/// it waits for the user.
pub(crate) async fn spawn_fake_rpc_delayed<F>(delay: Duration, responder: F) -> String
where
    F: Fn(&str, &Value) -> std::result::Result<Value, (i64, String)> + Send + Sync + 'static,
{
    let responder: Arc<Responder> = Arc::new(responder);
    let app = Router::new().route(
        "/",
        post(move |Json(body): Json<Value>| {
            let responder = responder.clone();
            async move {
                let id = body["id"].clone();
                let method = body["method"].as_str().unwrap_or_default().to_string();
                let params = body["params"].clone();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let reply = match responder(&method, &params) {
                    Ok(result) => json!({"jsonrpc": "2.0", "id": id, "result": result}),
                    Err((code, message)) => {
                        json!({"jsonrpc": "2.0", "id": id, "error": {"code": code, "message": message}})
                    }
                };
                Json(reply)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// In-memory wallet. Receipts are handed out after `receipt_after` polls.
#[derive(Default)]
pub(crate) struct MockProvider {
    pub accounts: Mutex<Vec<Address>>,
    pub chain_id: Mutex<u64>,
    pub reject_access: Mutex<bool>,
    pub reject_send: Mutex<bool>,
    pub revert: Mutex<bool>,
    pub receipt_after: Mutex<u32>,
    pub sent: Mutex<Vec<TransactionRequest>>,
    /// `eth_requestAccounts` answers after this long.
    pub access_delay: Mutex<Duration>,
    access_requests: AtomicUsize,
    polls: Mutex<HashMap<B256, u32>>,
}

impl MockProvider {
    pub fn with_account(account: Address, chain_id: u64) -> Self {
        Self {
            accounts: Mutex::new(vec![account]),
            chain_id: Mutex::new(chain_id),
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<TransactionRequest> {
        self.sent.lock().clone()
    }

    pub fn access_requests(&self) -> usize {
        self.access_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for MockProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>> {
        self.access_requests.fetch_add(1, Ordering::SeqCst);
        let delay = *self.access_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if *self.reject_access.lock() {
            return Err(ConnectionError::Rejected.into());
        }
        Ok(self.accounts.lock().clone())
    }

    async fn accounts(&self) -> Result<Vec<Address>> {
        Ok(self.accounts.lock().clone())
    }

    async fn chain_id(&self) -> Result<u64> {
        Ok(*self.chain_id.lock())
    }

    async fn send_transaction(&self, tx: &TransactionRequest) -> Result<B256> {
        if *self.reject_send.lock() {
            return Err(AppError::TransactionSubmission("rejected in wallet".to_string()));
        }
        let mut sent = self.sent.lock();
        sent.push(tx.clone());
        Ok(B256::with_last_byte(sent.len() as u8))
    }

    async fn transaction_receipt(&self, hash: B256) -> Result<Option<TransactionReceipt>> {
        let mut polls = self.polls.lock();
        let count = polls.entry(hash).or_insert(0);
        *count += 1;
        if *count <= *self.receipt_after.lock() {
            return Ok(None);
        }
        let status = if *self.revert.lock() { U64::ZERO } else { U64::from(1) };
        Ok(Some(TransactionReceipt {
            transaction_hash: hash,
            block_number: Some(U64::from(100)),
            status: Some(status),
        }))
    }
}
