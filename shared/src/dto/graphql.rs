//! GraphQL-over-HTTP envelopes.

use serde::{Deserialize, Serialize};

/// A GraphQL POST body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<V> {
    pub query: String,
    pub variables: V,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
}

impl<V> GraphQlRequest<V> {
    pub fn new(query: &str, variables: V) -> Self {
        Self {
            query: query.to_string(),
            variables,
            operation_name: None,
        }
    }

    pub fn with_operation_name(mut self, name: &str) -> Self {
        self.operation_name = Some(name.to_string());
        self
    }
}

/// A GraphQL response. Both `data` and `errors` may be present at once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// Join all error messages with `"; "`, or `None` when there are none.
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| e.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_operation_name_camel_case() {
        let req = GraphQlRequest::new("{ ping }", json!({})).with_operation_name("ping");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["operationName"], "ping");
        assert_eq!(value["query"], "{ ping }");
    }

    #[test]
    fn test_response_error_message() {
        let resp: GraphQlResponse<serde_json::Value> = serde_json::from_value(json!({
            "errors": [{ "message": "bad field" }, { "message": "timeout", "locations": [] }]
        }))
        .unwrap();
        assert!(resp.data.is_none());
        assert_eq!(resp.error_message().as_deref(), Some("bad field; timeout"));
    }
}
