//! Client error types

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Kind of a failed API call, decided by the `type` field of the error body
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or rejected bearer token
    Unauthenticated,
    /// Authenticated, but not allowed to touch the resource
    Forbidden,
    /// The file or folder does not exist
    NotFound,
    /// Anything else, including failures with no usable response
    Unknown,
}

impl ErrorKind {
    /// Map a server discriminator to a kind. Unrecognized values are `Unknown`.
    pub fn from_discriminator(discriminator: &str) -> Self {
        match discriminator {
            "UNAUTHENTICATED" => Self::Unauthenticated,
            "FORBIDDEN" => Self::Forbidden,
            "NOT_FOUND" => Self::NotFound,
            _ => Self::Unknown,
        }
    }

    /// The wire discriminator for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Forbidden => "forbidden",
            Self::NotFound => "not found",
            Self::Unknown => "unknown error",
        };
        f.write_str(label)
    }
}

/// A failed API call.
///
/// Every failure path of the client ends up here with exactly one [`ErrorKind`].
/// The server's human readable message is kept when it sent one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {}", .message.as_deref().unwrap_or("no message"))]
pub struct ClientError {
    kind: ErrorKind,
    message: Option<String>,
    status: Option<u16>,
}

impl ClientError {
    /// Create an error of the given kind
    pub fn new(kind: ErrorKind, message: Option<String>) -> Self {
        Self {
            kind,
            message,
            status: None,
        }
    }

    /// An `Unknown` error with a locally produced message
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unknown, Some(message.into()))
    }

    /// Classify a non-2xx response from its status and raw body.
    ///
    /// `type` and `message` are read independently, so a malformed field never
    /// hides the other. Bodies that are not JSON, or JSON without a string
    /// `type`, classify as `Unknown`.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
        let kind = parsed
            .get("type")
            .and_then(Value::as_str)
            .map(ErrorKind::from_discriminator)
            .unwrap_or(ErrorKind::Unknown);
        let message = parsed
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            kind,
            message,
            status: Some(status),
        }
    }

    /// Classify a transport failure that produced no response
    pub(crate) fn from_transport(err: &reqwest::Error) -> Self {
        Self {
            kind: ErrorKind::Unknown,
            message: None,
            status: err.status().map(|s| s.as_u16()),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Server supplied message, if any
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        self.status
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }

    /// Check if the call was rejected for lack of credentials
    pub fn is_unauthenticated(&self) -> bool {
        self.kind == ErrorKind::Unauthenticated
    }

    /// Check if this is an access denied error
    pub fn is_forbidden(&self) -> bool {
        self.kind == ErrorKind::Forbidden
    }
}

/// Errors raised while building a client, before any request is made
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A configured URL does not parse
    #[error("Invalid {field} URL '{value}': {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// A configured URL cannot have paths appended, e.g. `mailto:`
    #[error("Invalid {field} URL '{value}': cannot be used as a base")]
    NotABase { field: &'static str, value: String },

    /// A header value contains characters HTTP does not allow
    #[error("Invalid header value for {0}")]
    InvalidHeader(&'static str),

    /// The underlying HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
