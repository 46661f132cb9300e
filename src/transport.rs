//! Transport boundary types.
//!
//! The SDK depends on a single collaborator interface: anything that can
//! send a printed document with variables and headers and hand back a
//! [`RawEnvelope`]. HTTP details, auth, retries, timeouts, and cancellation
//! all live behind [`Transport`].

use std::future::Future;
use std::pin::Pin;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Boxed future returned across the transport and wrapper boundaries.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Request/response headers, insertion-ordered.
pub type Headers = IndexMap<String, String>;

/// A server-reported GraphQL error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

/// The untyped result envelope produced by a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEnvelope {
    pub data: Option<serde_json::Value>,
    pub errors: Vec<GraphQLError>,
    pub extensions: Option<serde_json::Value>,
    /// Response headers; a repeated header name keeps the last occurrence.
    pub headers: Headers,
    pub status: u16,
}

impl RawEnvelope {
    /// Deserializes `data` into its operation-specific shape. Every other
    /// field passes through unchanged.
    pub fn into_typed<T: DeserializeOwned>(self) -> SdkResult<Envelope<T>> {
        let data = match self.data {
            Some(value) => Some(serde_json::from_value(value).map_err(|e| {
                SdkError::deserialize(format!("Failed to deserialize response data: {}", e))
            })?),
            None => None,
        };
        Ok(Envelope {
            data,
            errors: self.errors,
            extensions: self.extensions,
            headers: self.headers,
            status: self.status,
        })
    }
}

/// The typed result envelope returned per SDK call.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    /// Typed payload matching the operation's declared result shape.
    pub data: Option<T>,
    /// Server-reported failures, possibly alongside partial data.
    pub errors: Vec<GraphQLError>,
    /// Extensions payload.
    pub extensions: Option<serde_json::Value>,
    /// Response headers from the transport.
    pub headers: Headers,
    /// HTTP status of the transport response.
    pub status: u16,
}

impl<T> Envelope<T> {
    /// Returns `true` if no GraphQL errors were returned.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The sole collaborator interface the SDK depends on.
///
/// `query` is the printed document text; documents are process-lifetime
/// statics, so the text is `&'static`.
pub trait Transport: Send + Sync {
    fn raw_request(
        &self,
        query: &'static str,
        variables: serde_json::Value,
        headers: Headers,
    ) -> BoxFuture<'_, SdkResult<RawEnvelope>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_typed_preserves_errors_and_metadata() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Data {
            value: i64,
        }

        let mut headers = Headers::new();
        headers.insert("x-request-id".to_string(), "r1".to_string());
        let raw = RawEnvelope {
            data: Some(serde_json::json!({ "value": 7 })),
            errors: vec![GraphQLError {
                message: "partial failure".to_string(),
                path: None,
                extensions: None,
            }],
            extensions: Some(serde_json::json!({ "traceId": "t" })),
            headers: headers.clone(),
            status: 200,
        };

        let envelope = raw.into_typed::<Data>().unwrap();
        assert_eq!(envelope.data, Some(Data { value: 7 }));
        assert_eq!(envelope.errors.len(), 1);
        assert_eq!(envelope.headers, headers);
        assert_eq!(envelope.status, 200);
        assert!(!envelope.is_ok());
    }

    #[test]
    fn test_into_typed_rejects_mismatched_shape() {
        #[derive(Debug, serde::Deserialize)]
        struct Data {
            #[allow(dead_code)]
            value: i64,
        }

        let raw = RawEnvelope {
            data: Some(serde_json::json!({ "value": "not a number" })),
            errors: vec![],
            extensions: None,
            headers: Headers::new(),
            status: 200,
        };

        let err = raw.into_typed::<Data>().unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::DeserializeError);
    }
}
