//! # Indexer
//!
//! GraphQL client for the hosted stream indexer.
//!
//! ## Modules
//!
//! - **client**: `IndexerClient` (HTTP client, implements `IndexerService`)
//! - **streams**: the streams-by-account query

pub mod client;
pub mod streams;

pub use client::IndexerClient;
