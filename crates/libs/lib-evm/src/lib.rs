//! # EVM Library
//!
//! Wallet and contract integration for the stream terminal: JSON-RPC transport,
//! wallet connector, signer resolution, confirmation polling and the typed Sablier /
//! ERC20 callers.
//!
//! ```text
//! WalletConnector ──> Provider (HttpProvider | mock)
//!        │
//!        └─ ConnectionState.signer() ──> ProviderOrSigner ──> ContractCaller
//!                                                                │
//!                                    SablierClient (StreamContracts) ──> CreateStreamSaga
//! ```

pub mod connector;
pub mod contracts;
pub mod flows;
pub mod pending;
pub mod provider;
pub mod rpc;
pub mod signer;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types from root for convenience
pub use connector::{ConnectionState, InjectedConnector, ProviderEvent, WalletConnector};
pub use contracts::ContractCaller;
pub use flows::{CreateStreamSaga, CreateStreamStage, CreateStreamStep, SablierClient, StreamContracts};
pub use pending::PendingTransaction;
pub use provider::{HttpProvider, Provider};
pub use signer::{provider_or_signer, ProviderOrSigner, UncheckedSigner};
pub use types::{TransactionReceipt, TransactionRequest};
