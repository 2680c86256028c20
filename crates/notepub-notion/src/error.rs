//! Error types for Notion integration.

use serde::Deserialize;

/// Payload rejected locally before any request is sent.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PayloadError {
    /// Parent database ID is empty.
    #[error("parent database ID is empty")]
    MissingDatabaseId,

    /// Too many top-level blocks for a single create request.
    #[error("{count} child blocks exceed the limit of {max}")]
    TooManyChildren {
        /// Number of blocks in the request.
        count: usize,
        /// Maximum accepted by the API.
        max: usize,
    },

    /// A rich text run is longer than the API accepts.
    #[error("rich text of {length} characters exceeds the limit of {max}")]
    TextTooLong {
        /// Length of the offending run, in characters.
        length: usize,
        /// Maximum accepted by the API.
        max: usize,
    },

    /// Table declared with no columns.
    #[error("table width must be at least 1")]
    EmptyTable,

    /// Table row cell count differs from the table width.
    #[error("table row {row} has {actual} cells, expected {expected}")]
    TableRowWidth {
        /// Zero-based row index.
        row: usize,
        /// Declared table width.
        expected: usize,
        /// Cells found in the row.
        actual: usize,
    },

    /// Table contains a child that is not a table row.
    #[error("table children must be table_row blocks")]
    UnexpectedTableChild,

    /// Table row found outside a table.
    #[error("table_row block outside of a table")]
    OrphanTableRow,
}

/// Integration token failed the format check.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TokenError {
    /// No token given.
    #[error("token is empty")]
    Empty,

    /// Token does not start with an accepted prefix.
    #[error("token should start with one of: {}", .expected.join(", "))]
    BadPrefix {
        /// Accepted prefixes.
        expected: &'static [&'static str],
    },
}

/// Category of a transport-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// Host name could not be resolved.
    Dns,
    /// Connection could not be established or was reset.
    Connection,
    /// Request did not complete within the configured timeout.
    Timeout,
    /// TLS, protocol, or other client-side failure.
    Other,
}

/// HTTP request failed before a response status was received.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct TransportError {
    /// Failure category.
    pub kind: TransportErrorKind,
    /// Human-readable description.
    pub message: String,
}

impl TransportError {
    /// Create a transport error.
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ureq::Error> for TransportError {
    fn from(err: ureq::Error) -> Self {
        let kind = match &err {
            ureq::Error::Timeout(_) => TransportErrorKind::Timeout,
            ureq::Error::HostNotFound => TransportErrorKind::Dns,
            ureq::Error::ConnectionFailed | ureq::Error::Io(_) => TransportErrorKind::Connection,
            _ => TransportErrorKind::Other,
        };
        Self::new(kind, err.to_string())
    }
}

/// Error object returned by the Notion API on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    /// Machine-readable code (e.g. `validation_error`, `unauthorized`).
    pub code: String,
    /// Human-readable message.
    pub message: String,
}

impl ApiError {
    /// Parse an API error body, returning `None` for anything else.
    pub(crate) fn parse(body: &str) -> Option<Self> {
        #[derive(Deserialize)]
        struct Envelope {
            object: String,
            #[serde(flatten)]
            error: ApiError,
        }

        let envelope: Envelope = serde_json::from_str(body).ok()?;
        (envelope.object == "error").then_some(envelope.error)
    }
}

/// Classification of a rejected request by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// 400: malformed or schema-invalid payload.
    Validation,
    /// 401: token missing or invalid.
    Unauthorized,
    /// 403: integration lacks access to the target.
    Forbidden,
    /// 404: target does not exist or is not shared with the integration.
    NotFound,
    /// 409: conflicting concurrent change.
    Conflict,
    /// 429: rate limited.
    RateLimited,
    /// 5xx.
    Server,
    /// Any other status.
    Other,
}

impl Rejection {
    /// Classify an HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::Validation,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            409 => Self::Conflict,
            429 => Self::RateLimited,
            500..=599 => Self::Server,
            _ => Self::Other,
        }
    }
}

/// Error from Notion API operations.
#[derive(Debug, thiserror::Error)]
pub enum NotionError {
    /// Request payload violates API limits; nothing was sent.
    #[error("invalid page request: {0}")]
    InvalidRequest(#[from] PayloadError),

    /// JSON serialization error.
    #[error("JSON error")]
    Serialize(#[from] serde_json::Error),

    /// HTTP request failed (DNS, connection, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] TransportError),

    /// Server answered with a non-success status.
    #[error("HTTP error: {status} - {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
        /// Parsed API error, when the body is one.
        api: Option<ApiError>,
    },

    /// Success response whose body could not be decoded.
    #[error("unexpected response body: {body}")]
    Decode {
        /// Raw response body.
        body: String,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },
}

impl NotionError {
    /// Classification of a rejected request, `None` for other errors.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Rejected { status, .. } => Some(Rejection::from_status(*status)),
            _ => None,
        }
    }
}
