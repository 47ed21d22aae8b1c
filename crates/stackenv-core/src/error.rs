//! Error types for stackenv
//!
//! Unresolved references are deliberately NOT errors: they resolve to null
//! and are reported through `log::warn!` so one dangling reference cannot
//! fail an otherwise valid deployment. Errors are reserved for conditions
//! that make a resolution run (or a single attribute lookup) meaningless.

use thiserror::Error;

/// Result type alias for stackenv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for stackenv operations
#[derive(Debug, Error)]
pub enum Error {
    /// No mapping is registered for the resource's service/kind.
    ///
    /// Distinct from a missing inventory match: the resource exists in the
    /// stack, but the registry does not know how to read its attributes.
    #[error("no attribute mapping for resource '{logical_id}' of type '{resource_type}'")]
    UnsupportedResourceType {
        logical_id: String,
        resource_type: String,
    },

    /// A provider request failed (network, auth, throttling).
    ///
    /// Never retried here; listing failures abort the whole run.
    #[error("{service} {operation} request failed: {message}")]
    Provider {
        service: String,
        operation: String,
        message: String,
    },

    /// A provider response did not have the expected shape.
    #[error("unexpected {operation} response: {message}")]
    InvalidResponse { operation: String, message: String },

    /// A recognized intrinsic key carried a payload of the wrong shape,
    /// e.g. `Fn::Join` without a `[delimiter, parts]` pair.
    #[error("malformed reference expression: {0}")]
    MalformedExpression(String),

    /// An attribute or return path could not be parsed,
    /// e.g. an unterminated `[` index.
    #[error("invalid attribute path '{0}'")]
    InvalidPath(String),
}

impl Error {
    /// Create a provider request failure.
    pub fn provider(
        service: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Provider {
            service: service.into(),
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create an invalid response error.
    pub fn invalid_response(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// True for errors the evaluator recovers locally (the affected variable
    /// resolves to null); everything else aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::UnsupportedResourceType { .. })
    }
}
