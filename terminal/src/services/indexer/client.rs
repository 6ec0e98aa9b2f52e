//! # Indexer Client
//!
//! HTTP client for the GraphQL stream indexer.

use crate::core::error::{AppError, Result};
use crate::core::service::IndexerService;
use alloy_primitives::Address;
use reqwest::Client;
use shared::dto::streams::StreamsData;
use std::time::Duration;

/// HTTP client bound to one indexer endpoint.
///
/// Holds a pooled `reqwest::Client`; clone the `Arc` around it rather than the client.
pub struct IndexerClient {
    pub(crate) client: Client,
    url: String,
}

impl IndexerClient {
    /// Create a client with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::State(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub(crate) fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl IndexerService for IndexerClient {
    async fn fetch_streams(&self, account: Address) -> Result<StreamsData> {
        crate::services::indexer::streams::fetch_streams(self, account).await
    }
}
