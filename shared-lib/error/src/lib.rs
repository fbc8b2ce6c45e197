//! Common error types for the petstore gateway.
//!
//! Every failure the transcoding pipeline or an external handler can
//! produce is one of the kinds below, and every kind has a fixed HTTP
//! status. The mapping is total: anything that does not fit a specific
//! kind is a `HandlerError::Internal` and renders as a 500.

use thiserror::Error;

/// Failures reported by external business-logic handlers.
///
/// The gateway never produces these itself; they cross the dispatcher
/// boundary verbatim and are mapped to HTTP by the error mapper.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HandlerError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Internal(String),
}

/// Failures produced anywhere in the request pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// No registered route matches the verb and path.
    #[error("no route matches {verb} {path}")]
    RouteNotFound { verb: String, path: String },

    /// A route matched but no handler is registered for its service.
    #[error("no handler registered for {0}")]
    NotImplemented(String),

    /// Type coercion failure, missing required field, invalid enum
    /// value, out-of-range id, or malformed JSON.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Body present with a content type the route does not accept.
    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// Body exceeds the configured maximum size.
    #[error("request body exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    /// External handler failure, passed through unchanged.
    #[error(transparent)]
    Handler(#[from] HandlerError),
}

impl GatewayError {
    /// Convenience constructor for binding failures.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// HTTP status code for this failure kind.
    pub fn status(&self) -> u16 {
        match self {
            Self::RouteNotFound { .. } => 404,
            Self::NotImplemented(_) => 501,
            Self::InvalidArgument(_) => 400,
            Self::UnsupportedMediaType(_) => 415,
            Self::PayloadTooLarge { .. } => 413,
            Self::Handler(HandlerError::NotFound(_)) => 404,
            Self::Handler(HandlerError::Unauthorized(_)) => 401,
            Self::Handler(HandlerError::Internal(_)) => 500,
        }
    }

    /// Stable kind name rendered in the `type` field of error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RouteNotFound { .. } => "NotFound",
            Self::NotImplemented(_) => "NotImplemented",
            Self::InvalidArgument(_) => "InvalidArgument",
            Self::UnsupportedMediaType(_) => "UnsupportedMediaType",
            Self::PayloadTooLarge { .. } => "PayloadTooLarge",
            Self::Handler(HandlerError::NotFound(_)) => "NotFound",
            Self::Handler(HandlerError::Unauthorized(_)) => "Unauthorized",
            Self::Handler(HandlerError::Internal(_)) => "HandlerFailure",
        }
    }
}

/// Result type alias using GatewayError.
pub type Result<T> = std::result::Result<T, GatewayError>;
