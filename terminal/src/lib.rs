//! # Stream Terminal - Library Root
//!
//! A **native desktop GUI** for Sablier token payment streams: connect a wallet, create a
//! stream (approve then `createStream`), and cancel or withdraw from the streams the
//! connected account sends or receives.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              stream-terminal (this crate)              │
//! ├────────────────────────────────────────────────────────┤
//! │  egui / eframe  - Immediate-mode GUI, one window       │
//! │  Tokio          - Async runtime for network work       │
//! │  Reqwest        - GraphQL indexer client               │
//! │  lib-evm        - Wallet connector, contract calls     │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ GraphQL over HTTP            │ JSON-RPC over HTTP
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Stream indexer │          │   Wallet provider       │
//! │  (subgraph)     │          │   (signs and sends)     │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: state, events, handlers and background tasks
//! - **core**: terminal error type and the service seams (`IndexerService`, `ContractsFactory`)
//! - **debug**: logging setup
//! - **services**: indexer client and the Sablier contracts factory
//! - **ui**: theme, widgets and the streams screen
//!
//! ## Event-Driven Architecture
//!
//! The main thread renders; tokio tasks do the network work and report back through an
//! unbounded channel of [`AppEvent`]s, drained in [`App::on_tick`] every frame. State
//! lives in `Arc<parking_lot::RwLock<AppState>>` and locks are never held across an
//! `.await`.
//!
//! ## Testing
//!
//! ```bash
//! cargo test -p stream-terminal
//! ```

pub mod app;
pub mod core;
pub mod debug;
pub mod services;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{App, AppEvent, AppState};
pub use core::{AppError, Result};
