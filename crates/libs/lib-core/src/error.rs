//! # Centralized Error Handling
//!
//! This module defines the error type [`AppError`] shared by `lib-core`, `lib-evm` and
//! the terminal's service layer. It follows the `thiserror` pattern for ergonomic error
//! handling.
//!
//! ## Error Categories
//!
//! The user-facing taxonomy has three kinds (see [`ErrorKind`]):
//!
//! 1. **Connection** - no wallet provider, the user rejected access, unsupported chain
//!    - [`Connection`](AppError::Connection)
//! 2. **Query** - the indexer is unreachable or answered with something malformed
//!    - [`Query`](AppError::Query)
//! 3. **Transaction** - a contract call failed
//!    - [`TransactionSubmission`](AppError::TransactionSubmission): the wallet or node refused the transaction
//!    - [`TransactionConfirmation`](AppError::TransactionConfirmation): it was mined and reverted, or never confirmed
//!
//! Everything else ([`Config`](AppError::Config), [`Rpc`](AppError::Rpc),
//! [`InvalidInput`](AppError::InvalidInput), [`Decoding`](AppError::Decoding),
//! [`Internal`](AppError::Internal)) is plumbing that callers usually map into one of
//! the three.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_recipient(recipient: &str) -> Result<&str> {
//!     if recipient.trim().is_empty() {
//!         return Err(AppError::InvalidInput("Recipient cannot be empty".to_string()));
//!     }
//!     Ok(recipient)
//! }
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Why a wallet connection could not be established.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// No wallet provider is configured for the connector.
    #[error("No wallet provider found")]
    NoProvider,

    /// The user declined the account access request (EIP-1193 code 4001).
    #[error("The user rejected the request")]
    Rejected,

    /// The provider is on a chain the connector does not support.
    #[error("Unsupported chain id {0}")]
    UnsupportedChain(u64),

    /// The provider endpoint could not be reached.
    #[error("Wallet provider unreachable: {0}")]
    Unreachable(String),
}

/// Application-wide error type.
///
/// Each variant includes a descriptive `String` for context. The `#[error]` attribute
/// from `thiserror` provides the `Display` implementation.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Wallet connection error.
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),

    /// JSON-RPC transport or node error outside of a transaction.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Indexer query error (unreachable, HTTP failure, GraphQL errors, malformed body).
    #[error("Query error: {0}")]
    Query(String),

    /// The transaction could not be submitted (rejected by the wallet, no signer, node error).
    #[error("Transaction submission failed: {0}")]
    TransactionSubmission(String),

    /// The transaction was submitted but reverted or did not confirm.
    #[error("Transaction confirmation failed: {0}")]
    TransactionConfirmation(String),

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Data decoding error (hex, JSON, ABI).
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Unexpected failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// User-facing error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Connection,
    Query,
    Transaction,
    Input,
    Internal,
}

impl AppError {
    /// Classify this error for presentation.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Connection(_) => ErrorKind::Connection,
            AppError::Query(_) => ErrorKind::Query,
            AppError::TransactionSubmission(_) | AppError::TransactionConfirmation(_) => {
                ErrorKind::Transaction
            }
            AppError::InvalidInput(_) => ErrorKind::Input,
            AppError::Config(_) | AppError::Rpc(_) | AppError::Decoding(_) | AppError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Whether this is a wallet refusal (user rejection) rather than a failure.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, AppError::Connection(ConnectionError::Rejected))
    }

    /// Message suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Connection(err) => err.to_string(),
            AppError::Query(msg) => format!("Could not load streams: {}", msg),
            AppError::TransactionSubmission(msg) => format!("Transaction not sent: {}", msg),
            AppError::TransactionConfirmation(msg) => format!("Transaction failed on-chain: {}", msg),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Config(msg) => format!("Configuration problem: {}", msg),
            AppError::Rpc(msg) => format!("Wallet RPC error: {}", msg),
            AppError::Decoding(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
