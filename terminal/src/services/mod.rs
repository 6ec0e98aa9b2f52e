//! # Services Module
//!
//! External service integrations for the stream terminal.
//!
//! ```text
//! services/
//! ├── indexer/      - GraphQL client for the stream indexer
//! │                   (streams sent and received by an account)
//! └── contracts.rs  - Sablier/ERC20 callers bound to the connected wallet
//! ```
//!
//! The wallet itself lives in `lib_evm::WalletConnector`; the terminal only holds an
//! `Arc` to it inside [`crate::core::Services`].

pub mod contracts;
pub mod indexer;

pub use contracts::SablierContractsFactory;
pub use indexer::IndexerClient;
