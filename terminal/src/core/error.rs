//! # Common Error Types
//!
//! Consolidated error handling for the terminal application.
//!
//! Library errors ([`lib_core::AppError`]) are folded into the three kinds the user
//! sees, plus two the terminal raises itself:
//!
//! - **Connection**: no wallet provider, the user rejected access, unsupported chain
//! - **Query**: the indexer could not be reached or returned something unusable
//! - **Transaction**: a contract call was not sent, or was sent and failed on-chain
//! - **Validation**: the create-stream form is incomplete or inconsistent
//! - **State**: the app is not in a state that allows the action
//!
//! ## Usage Pattern
//!
//! ```rust,no_run
//! use stream_terminal::core::error::AppError;
//!
//! fn require_account(account: Option<&str>) -> Result<&str, AppError> {
//!     account.ok_or_else(|| AppError::State("Connect a wallet first".to_string()))
//! }
//! ```

use lib_core::ErrorKind;
use thiserror::Error;

/// Application-wide error type covering all error scenarios in the terminal.
///
/// Each variant carries a message ready for a toast.
///
/// # Example
///
/// ```rust
/// use stream_terminal::core::error::AppError;
///
/// let err = AppError::Validation("Deposit must be greater than 0".to_string());
/// assert_eq!(err.to_string(), "Deposit must be greater than 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Wallet connection error.
    #[error("Wallet connection failed: {0}")]
    Connection(String),

    /// Indexer query error.
    #[error("Could not load streams: {0}")]
    Query(String),

    /// Contract call error. The message says whether it was sent.
    #[error("{0}")]
    Transaction(String),

    /// Input validation error.
    #[error("{0}")]
    Validation(String),

    /// Application state error.
    #[error("State error: {0}")]
    State(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Whether the failure is the user declining in their wallet; shown as a warning.
    pub fn is_user_rejection(&self) -> bool {
        match self {
            AppError::Connection(msg) | AppError::Transaction(msg) => msg.contains("rejected"),
            _ => false,
        }
    }
}

impl From<lib_core::AppError> for AppError {
    fn from(err: lib_core::AppError) -> Self {
        match (&err, err.kind()) {
            (lib_core::AppError::Connection(inner), _) => AppError::Connection(inner.to_string()),
            (lib_core::AppError::Query(msg), _) => AppError::Query(msg.clone()),
            (_, ErrorKind::Transaction) => AppError::Transaction(err.user_message()),
            (lib_core::AppError::InvalidInput(msg), _) => AppError::Validation(msg.clone()),
            _ => AppError::State(err.to_string()),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Query(err.to_string())
    }
}
