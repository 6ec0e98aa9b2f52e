//! # Core Library
//!
//! Configuration, chain address table, error type and stream domain model shared by
//! the EVM integration and the terminal.

pub mod config;
pub mod error;
pub mod model;

// Re-export commonly used types
pub use config::{Config, core_config, init_config};
pub use error::{AppError, ConnectionError, ErrorKind, Result};
pub use model::address_book::{AddressBook, ChainAddresses};
pub use model::stream::{Stream, StreamRole, StreamStatus, StreamTerms};
