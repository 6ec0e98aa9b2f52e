//! # Core Abstractions
//!
//! Core traits and error types for dependency injection and better testability.
//!
//! - **[`error`]**: Application error types (`AppError`, `Result<T>`)
//! - **[`service`]**: Service traits for dependency injection (`IndexerService`, `ContractsFactory`)
//!
//! ## Dependency Injection
//!
//! ```rust,ignore
//! use stream_terminal::core::service::{IndexerService, Services};
//!
//! // In production: real implementations
//! let indexer: Arc<dyn IndexerService> = Arc::new(IndexerClient::new(url, timeout)?);
//!
//! // In tests: mock implementations
//! let indexer: Arc<dyn IndexerService> = Arc::new(MockIndexer::default());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{ContractsFactory, IndexerService, Services};
