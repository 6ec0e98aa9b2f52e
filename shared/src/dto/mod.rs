//! # Data Transfer Objects (DTOs)
//!
//! Data structures exchanged with the stream indexer.
//!
//! ## Module Organization
//!
//! - [`graphql`] - Request/response envelopes shared by every GraphQL call
//! - [`streams`] - The streams query, its variables and result rows
//!
//! ## Example JSON Communication
//!
//! ```text
//! POST /subgraphs/name/sablierhq/sablier-rinkeby
//! Content-Type: application/json
//!
//! {
//!   "query": "query streams($account: String!) { ... }",
//!   "variables": { "account": "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2" },
//!   "operationName": "streams"
//! }
//! ```
//!
//! ```text
//! HTTP/1.1 200 OK
//! Content-Type: application/json
//!
//! {
//!   "data": {
//!     "senderStreams": [
//!       { "id": "42", "recipient": "0x...", "deposit": "100000000000000000000",
//!         "startTime": "1600000000", "stopTime": "1600000100" }
//!     ],
//!     "recipientStreams": []
//!   }
//! }
//! ```

pub mod graphql;
pub mod streams;

pub use graphql::*;
pub use streams::*;
