//! The GraphQL gateway seam.
//!
//! Every front end (admin dashboard, POS extension, CLI) reaches the platform
//! through a [`Gateway`]. The browser only ever sees a query document, a
//! variables object, and the parsed `{data, errors}` envelope; how the request
//! travels is the adapter's business.

mod http;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{BrowserError, GatewayError};

pub use http::HttpGateway;

/// Capability to execute one GraphQL document against the platform.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Executes `document` with `variables` and returns the parsed envelope.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the request could not be completed or the
    /// body was not a GraphQL envelope. GraphQL-level `errors` are returned
    /// inside an `Ok` response and classified by the caller.
    async fn query(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<GraphqlResponse, GatewayError>;
}

/// The standard GraphQL response envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphqlError>>,
}

impl GraphqlResponse {
    /// A successful response carrying `data`.
    #[must_use]
    pub fn with_data(data: serde_json::Value) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    /// A failed response carrying one error per message.
    #[must_use]
    pub fn with_errors<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: None,
            errors: Some(
                messages
                    .into_iter()
                    .map(|m| GraphqlError {
                        message: m.into(),
                        extensions: None,
                    })
                    .collect(),
            ),
        }
    }
}

/// One entry of a response's `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphqlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<serde_json::Value>,
}

/// Classifies a response envelope and deserializes its `data` into `T`.
///
/// A non-empty `errors` array wins over any `data` present alongside it; no
/// partial extraction is attempted.
pub(crate) fn decode<T: DeserializeOwned>(
    response: GraphqlResponse,
    operation: &'static str,
) -> Result<T, BrowserError> {
    if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
        return Err(BrowserError::Graphql {
            operation,
            messages: errors.into_iter().map(|e| e.message).collect(),
        });
    }

    let data = response.data.filter(|d| !d.is_null()).ok_or_else(|| {
        BrowserError::malformed(operation, "response carried neither data nor errors")
    })?;

    serde_json::from_value(data).map_err(|e| BrowserError::malformed(operation, e.to_string()))
}
