use thiserror::Error;

/// Transport-level failures raised by a [`crate::Gateway`] implementation.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("throttled by {endpoint} (retry after {retry_after_secs}s)")]
    Throttled {
        endpoint: String,
        retry_after_secs: u64,
    },

    #[error("unauthorized (HTTP {status}) from {endpoint}; check the access token")]
    Unauthorized { status: u16, endpoint: String },

    #[error("unexpected HTTP status {status} from {endpoint}")]
    UnexpectedStatus { status: u16, endpoint: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid gateway endpoint \"{endpoint}\": {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// Failure reported by a non-HTTP adapter.
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Coarse classification handed to presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure or a non-empty GraphQL `errors` array.
    Gateway,
    /// The requested collection does not exist.
    NotFound,
    /// The response was missing fields the query asked for.
    MalformedResponse,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::Gateway => write!(f, "gateway error"),
            ErrorKind::NotFound => write!(f, "not found"),
            ErrorKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

/// Errors returned by browser operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("gateway request failed during {operation}: {source}")]
    Gateway {
        operation: &'static str,
        #[source]
        source: GatewayError,
    },

    #[error("GraphQL errors during {operation}: {}", .messages.join("; "))]
    Graphql {
        operation: &'static str,
        messages: Vec<String>,
    },

    #[error("collection not found: {collection_id}")]
    NotFound { collection_id: String },

    #[error("malformed response for {operation}: {reason}")]
    MalformedResponse {
        operation: &'static str,
        reason: String,
    },

    #[error("pagination limit reached during {operation}: exceeded {max_pages} pages")]
    PaginationLimit {
        operation: &'static str,
        max_pages: usize,
    },
}

impl BrowserError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            BrowserError::Gateway { .. }
            | BrowserError::Graphql { .. }
            | BrowserError::PaginationLimit { .. } => ErrorKind::Gateway,
            BrowserError::NotFound { .. } => ErrorKind::NotFound,
            BrowserError::MalformedResponse { .. } => ErrorKind::MalformedResponse,
        }
    }

    pub(crate) fn malformed(operation: &'static str, reason: impl Into<String>) -> Self {
        BrowserError::MalformedResponse {
            operation,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graphql_errors_are_gateway_kind() {
        let err = BrowserError::Graphql {
            operation: "list_collections",
            messages: vec!["Throttled".to_owned(), "Access denied".to_owned()],
        };
        assert_eq!(err.kind(), ErrorKind::Gateway);
        assert_eq!(
            err.to_string(),
            "GraphQL errors during list_collections: Throttled; Access denied"
        );
    }

    #[test]
    fn pagination_limit_is_gateway_kind() {
        let err = BrowserError::PaginationLimit {
            operation: "list_collections",
            max_pages: 3,
        };
        assert_eq!(err.kind(), ErrorKind::Gateway);
    }

    #[test]
    fn not_found_is_distinct_from_gateway() {
        let err = BrowserError::NotFound {
            collection_id: "gid://shopify/Collection/42".to_owned(),
        };
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_ne!(err.kind(), ErrorKind::Gateway);
    }

    #[test]
    fn transport_error_wraps_with_operation() {
        let err = BrowserError::Gateway {
            operation: "open_collection",
            source: GatewayError::Transport("connection reset".to_owned()),
        };
        assert_eq!(err.kind(), ErrorKind::Gateway);
        assert!(err.to_string().contains("open_collection"));
        assert!(err.to_string().contains("connection reset"));
    }
}
