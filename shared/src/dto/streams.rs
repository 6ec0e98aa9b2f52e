//! # Stream DTOs
//!
//! Rows returned by the indexer's `streams` entity, queried twice under two aliases:
//! streams the account sends (`senderStreams`) and streams it receives
//! (`recipientStreams`). Each alias selects only the counterparty address, so the two
//! row shapes differ by one field.

use serde::{Deserialize, Serialize};

/// The one query this client issues against the indexer.
pub const STREAMS_QUERY: &str = r#"
query streams($account: String!) {
  senderStreams: streams(where: {sender: $account}) {
    id
    recipient
    deposit
    startTime
    stopTime
  }
  recipientStreams: streams(where: {recipient: $account}) {
    id
    sender
    deposit
    startTime
    stopTime
  }
}
"#;

/// Operation name sent alongside [`STREAMS_QUERY`].
pub const STREAMS_OPERATION: &str = "streams";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamsVariables {
    pub account: String,
}

impl StreamsVariables {
    /// Subgraph ids are lower-case hex; a checksummed address would match nothing.
    pub fn for_account(account: &str) -> Self {
        Self {
            account: account.to_lowercase(),
        }
    }
}

/// A stream the queried account created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SenderStream {
    pub id: String,
    pub recipient: String,
    pub deposit: String,
    pub start_time: String,
    pub stop_time: String,
}

/// A stream paying the queried account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientStream {
    pub id: String,
    pub sender: String,
    pub deposit: String,
    pub start_time: String,
    pub stop_time: String,
}

/// `data` payload of the streams query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamsData {
    #[serde(default)]
    pub sender_streams: Vec<SenderStream>,
    #[serde(default)]
    pub recipient_streams: Vec<RecipientStream>,
}
