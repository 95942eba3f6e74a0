//! Error types for the PocketBase client.
//!
//! Two families of failure are kept apart:
//!
//! - **API errors** ([`Error::Api`]): the service answered with a non-2xx
//!   status. These carry the status code, the server's message and any
//!   field-level validation details.
//! - **Local errors**: everything that went wrong on this side of the wire,
//!   such as serializing the body, sending the request, decoding a successful
//!   response or reading a file for upload.
//!
//! Cancellation and deadline expiry have their own variants and are never
//! reported as API errors.

use std::collections::HashMap;
use std::fmt;

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::client::types::ApiErrorResponse;

/// Result type alias using the crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// The unified error type for client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body could not be serialized.
    #[error("failed to marshal request body: {0}")]
    Marshal(#[source] serde_json::Error),

    /// A header value (token or user agent) contains characters that cannot
    /// be sent over HTTP.
    #[error("failed to create request: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    /// reqwest rejected the request before sending it, e.g. because the
    /// base URL and endpoint do not form a valid URL.
    #[error("failed to create request: {0}")]
    RequestBuild(#[source] reqwest::Error),

    /// The request could not be executed (DNS, connection, TLS, ...).
    #[error("failed to execute request: {0}")]
    Request(#[source] reqwest::Error),

    /// The transport timeout configured on the HTTP client elapsed.
    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    /// The server reported success but the body was not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A file could not be read while building a multipart body.
    #[error("failed to encode multipart field {field}: {source}")]
    Multipart {
        field: String,
        #[source]
        source: std::io::Error,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    /// The caller cancelled the operation.
    #[error("operation cancelled")]
    Cancelled,

    /// The caller's deadline passed before the operation completed.
    #[error("deadline exceeded")]
    DeadlineExceeded,

    /// The service answered with a non-2xx status.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout(err)
        } else if err.is_builder() {
            Error::RequestBuild(err)
        } else {
            Error::Request(err)
        }
    }
}

impl Error {
    /// Returns the API error if this failure came from a non-2xx response.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }

    /// HTTP status of an API error, `None` for local failures.
    pub fn status(&self) -> Option<u16> {
        self.as_api().map(|err| err.status)
    }

    pub fn is_bad_request(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_bad_request)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_unauthorized)
    }

    pub fn is_forbidden(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_forbidden)
    }

    pub fn is_not_found(&self) -> bool {
        self.as_api().is_some_and(ApiError::is_not_found)
    }

    /// True for caller-initiated cancellation and deadline expiry.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled | Error::DeadlineExceeded)
    }
}

/// An error response from the PocketBase API.
///
/// `data` holds field-level validation details, keyed by field name, e.g.
/// `{"title": {"code": "validation_required", "message": "Missing required value."}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status code
    pub status: u16,
    /// Human-readable message from the server
    pub message: String,
    /// Field-level error details
    pub data: HashMap<String, Value>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pocketbase API error: {} {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            data: HashMap::new(),
        }
    }

    /// Build an API error from a non-2xx response body.
    ///
    /// Bodies that are not a PocketBase error envelope still produce an API
    /// error, using the HTTP status and its reason phrase.
    pub(crate) fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let reason = status.canonical_reason().unwrap_or("Unknown Status");

        match serde_json::from_slice::<ApiErrorResponse>(body) {
            Ok(envelope) => Self {
                status: if envelope.status == 0 {
                    status.as_u16()
                } else {
                    envelope.status
                },
                message: if envelope.message.is_empty() {
                    reason.to_string()
                } else {
                    envelope.message
                },
                data: envelope.data.unwrap_or_default(),
            },
            Err(_) => Self::new(status.as_u16(), reason),
        }
    }

    /// 400 Bad Request, usually a validation failure.
    pub fn is_bad_request(&self) -> bool {
        self.status == 400
    }

    /// 401 Unauthorized.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// 403 Forbidden.
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// 404 Not Found.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}
