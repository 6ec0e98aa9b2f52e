//! # Streams Query
//!
//! The single query the terminal issues: streams sent and received by an account.

use super::client::IndexerClient;
use crate::core::error::{AppError, Result};
use alloy_primitives::Address;
use shared::dto::graphql::{GraphQlRequest, GraphQlResponse};
use shared::dto::streams::{StreamsData, StreamsVariables, STREAMS_OPERATION, STREAMS_QUERY};

/// Fetch the streams `account` sends and receives.
///
/// Transport failures, non-2xx statuses, GraphQL `errors` and malformed bodies are all
/// `AppError::Query`.
#[tracing::instrument(skip(client), fields(indexer = %client.url()))]
pub async fn fetch_streams(client: &IndexerClient, account: Address) -> Result<StreamsData> {
    let start = std::time::Instant::now();
    let request = GraphQlRequest::new(STREAMS_QUERY, StreamsVariables::for_account(&account.to_string()))
        .with_operation_name(STREAMS_OPERATION);

    let response = client
        .client
        .post(client.url())
        .json(&request)
        .send()
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Streams query network error");
            AppError::Query(format!("Network error: {}", e))
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Streams query failed"
        );
        return Err(AppError::Query(format!("Indexer returned {}", status)));
    }

    let body: GraphQlResponse<StreamsData> = response.json().await.map_err(|e| {
        tracing::error!(error = %e, "Streams response parse error");
        AppError::Query(format!("Failed to parse response: {}", e))
    })?;

    if let Some(message) = body.error_message() {
        tracing::error!(errors = %message, "Indexer returned GraphQL errors");
        return Err(AppError::Query(message));
    }

    let data = body
        .data
        .ok_or_else(|| AppError::Query("Response carried no data".to_string()))?;

    tracing::debug!(
        duration_ms = start.elapsed().as_millis() as u64,
        sent = data.sender_streams.len(),
        received = data.recipient_streams.len(),
        "Streams fetched"
    );
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::service::IndexerService;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};
    use std::time::Duration;

    const ACCOUNT: &str = "0x9F8F72AA9304C8B593D555F12EF6589CC3A579A2";

    async fn spawn_indexer(reply: Value, status: StatusCode) -> String {
        let app = Router::new().route(
            "/",
            post(move |Json(body): Json<Value>| {
                let reply = reply.clone();
                async move {
                    assert_eq!(body["operationName"], "streams");
                    assert_eq!(body["variables"]["account"], ACCOUNT.to_lowercase());
                    (status, Json(reply))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn account() -> Address {
        ACCOUNT.parse().unwrap()
    }

    #[tokio::test]
    async fn test_streams_are_partitioned() {
        let url = spawn_indexer(
            json!({
                "data": {
                    "senderStreams": [
                        {"id": "1", "recipient": "0x00000000000000000000000000000000000000b0",
                         "deposit": "100000000000000000000", "startTime": "1600000000", "stopTime": "1600000100"}
                    ],
                    "recipientStreams": [
                        {"id": "1", "sender": "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2",
                         "deposit": "100000000000000000000", "startTime": "1600000000", "stopTime": "1600000100"},
                        {"id": "2", "sender": "0x00000000000000000000000000000000000000c0",
                         "deposit": "5", "startTime": "1", "stopTime": "2"}
                    ]
                }
            }),
            StatusCode::OK,
        )
        .await;

        let client = IndexerClient::new(url, Duration::from_secs(5)).unwrap();
        let data = client.fetch_streams(account()).await.unwrap();
        assert_eq!(data.sender_streams.len(), 1);
        assert_eq!(data.recipient_streams.len(), 2);
        assert_eq!(data.sender_streams[0].id, data.recipient_streams[0].id);
    }

    #[tokio::test]
    async fn test_graphql_errors_are_query_errors() {
        let url = spawn_indexer(
            json!({"errors": [{"message": "indexing_error"}]}),
            StatusCode::OK,
        )
        .await;

        let client = IndexerClient::new(url, Duration::from_secs(5)).unwrap();
        let err = client.fetch_streams(account()).await.unwrap_err();
        assert_eq!(err, AppError::Query("indexing_error".to_string()));
    }

    #[tokio::test]
    async fn test_http_failure_is_query_error() {
        let url = spawn_indexer(json!({}), StatusCode::BAD_GATEWAY).await;

        let client = IndexerClient::new(url, Duration::from_secs(5)).unwrap();
        let err = client.fetch_streams(account()).await.unwrap_err();
        assert!(matches!(err, AppError::Query(_)));
    }

    #[tokio::test]
    async fn test_unreachable_indexer() {
        let client = IndexerClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = client.fetch_streams(account()).await.unwrap_err();
        assert!(matches!(err, AppError::Query(_)));
    }
}
