//! # JSON-RPC Transport
//!
//! Minimal JSON-RPC 2.0 client over `reqwest`. Every wallet and node call made by the
//! terminal goes through [`RpcClient::request`], or [`RpcClient::request_prompting`] for
//! methods the wallet holds open until the user answers.
//!
//! ```text
//! -> {"jsonrpc":"2.0","id":7,"method":"eth_chainId","params":[]}
//! <- {"jsonrpc":"2.0","id":7,"result":"0x4"}
//! <- {"jsonrpc":"2.0","id":7,"error":{"code":4001,"message":"User rejected the request."}}
//! ```

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use thiserror::Error;

/// EIP-1193 "user rejected request".
pub const USER_REJECTED_CODE: i64 = 4001;

/// Transport-level failure of a JSON-RPC call.
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    /// The endpoint could not be reached (connection refused, DNS, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// The endpoint answered with a JSON-RPC error object.
    #[error("JSON-RPC error {code}: {message}")]
    Response { code: i64, message: String },

    /// The body was not a JSON-RPC response or `result` had the wrong shape.
    #[error("malformed response: {0}")]
    Decoding(String),
}

impl RpcError {
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, RpcError::Response { code, .. } if *code == USER_REJECTED_CODE)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, RpcError::Transport(_) | RpcError::Status(_))
    }
}

impl From<reqwest::Error> for RpcError {
    fn from(err: reqwest::Error) -> Self {
        RpcError::Transport(err.to_string())
    }
}

impl From<RpcError> for lib_core::AppError {
    fn from(err: RpcError) -> Self {
        lib_core::AppError::Rpc(err.to_string())
    }
}

#[derive(Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

#[derive(Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC client bound to one endpoint.
///
/// The HTTP client carries no overall timeout; each request sets its own.
#[derive(Debug)]
pub struct RpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
    /// Limit for calls answered without user involvement.
    timeout: Duration,
    /// Limit for calls waiting on the user; `None` waits indefinitely.
    prompt_timeout: Option<Duration>,
}

impl RpcClient {
    /// Build a client. `timeout` bounds connecting and every non-prompting call.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, RpcError> {
        let client = Client::builder()
            .connect_timeout(timeout)
            .build()
            .map_err(|e| RpcError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
            timeout,
            prompt_timeout: None,
        })
    }

    /// Bound calls made through [`RpcClient::request_prompting`].
    pub fn with_prompt_timeout(mut self, prompt_timeout: Option<Duration>) -> Self {
        self.prompt_timeout = prompt_timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Call `method` with `params` and decode `result` into `R`.
    ///
    /// A `null` result decodes into `R` as-is, so `R = Option<T>` sees `None`.
    pub async fn request<P, R>(&self, method: &str, params: P) -> Result<R, RpcError>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        self.call(method, params, Some(self.timeout)).await
    }

    /// Like [`RpcClient::request`] for methods that wait for the user to approve in the
    /// wallet (`eth_requestAccounts`, `eth_sendTransaction`). Only the prompt timeout applies.
    pub async fn request_prompting<P, R>(&self, method: &str, params: P) -> Result<R, RpcError>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        self.call(method, params, self.prompt_timeout).await
    }

    #[tracing::instrument(skip(self, params), fields(url = %self.url))]
    async fn call<P, R>(&self, method: &str, params: P, timeout: Option<Duration>) -> Result<R, RpcError>
    where
        P: Serialize + Send,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };

        let mut builder = self.client.post(&self.url).json(&body);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "JSON-RPC transport failure");
                RpcError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "JSON-RPC endpoint returned error status");
            return Err(RpcError::Status(status.as_u16()));
        }

        let envelope: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| RpcError::Decoding(e.to_string()))?;

        if let Some(err) = envelope.error {
            tracing::debug!(code = err.code, message = %err.message, "JSON-RPC error response");
            return Err(RpcError::Response {
                code: err.code,
                message: err.message,
            });
        }

        serde_json::from_value(envelope.result.unwrap_or(Value::Null))
            .map_err(|e| RpcError::Decoding(format!("{}: {}", method, e)))
    }
}
