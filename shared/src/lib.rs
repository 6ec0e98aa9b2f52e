//! # Shared Data Transfer Objects Library
//!
//! This library defines the wire contract between the terminal and the stream indexer.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Data Transfer Objects for indexer communication
//!   - **[`dto::graphql`]**: Generic GraphQL request/response envelopes
//!   - **[`dto::streams`]**: Stream rows returned by the streams query
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!
//! ## Wire Format
//!
//! The indexer speaks GraphQL over HTTP POST. Field names are camelCase on the wire
//! (`startTime`, `senderStreams`) and snake_case in Rust; every DTO carries
//! `#[serde(rename_all = "camelCase")]`. Big integers (`deposit`, timestamps) arrive
//! as JSON strings and are kept as strings here; numeric conversion happens at the
//! edge that needs it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shared::dto::graphql::{GraphQlRequest, GraphQlResponse};
//! use shared::dto::streams::{StreamsData, StreamsVariables, STREAMS_QUERY};
//!
//! # async fn example() -> Result<(), reqwest::Error> {
//! let request = GraphQlRequest::new(STREAMS_QUERY, StreamsVariables::for_account("0xabc"));
//!
//! let response: GraphQlResponse<StreamsData> = reqwest::Client::new()
//!     .post("https://api.thegraph.com/subgraphs/name/sablierhq/sablier-rinkeby")
//!     .json(&request)
//!     .send()
//!     .await?
//!     .json()
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
