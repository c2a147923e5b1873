//! Error types for SDK calls.

use derive_more::{Display, Error, From};

use crate::CodeError;

/// Main error type for SDK operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A request option is not allowed (e.g. a reserved header key).
    #[display("illegal param: {_0}")]
    #[from(skip)]
    IllegalParam(#[error(not(source))] String),

    /// The request exceeded the client deadline.
    #[display("client time out: {_0}")]
    #[from(skip)]
    ClientTimeout(#[error(not(source))] String),

    /// The connection could not be established.
    #[display("dial failed: {_0}")]
    #[from(skip)]
    DialFailed(#[error(not(source))] String),

    /// The remote gateway answered `504 Gateway Timeout`.
    #[display("server time out error")]
    #[from(skip)]
    ServerTimeout,

    /// Any other transport failure, passed through from the HTTP client.
    #[display("transport error: {_0}")]
    #[from(skip)]
    Transport(#[error(not(source))] String),

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    JsonSerialization(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "error.field_violations[0]").
        path: String,
        /// Error message.
        message: String,
    },

    /// The server answered with a non-zero business code.
    #[display("API error {status} (request id '{request_id}'): {error}")]
    #[from(skip)]
    Api {
        /// HTTP status code.
        status: u16,
        /// Correlation id of the exchange, empty when the server sent none.
        request_id: String,
        /// Decoded error payload.
        #[error(not(source))]
        error: CodeError,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an illegal parameter error.
    #[must_use]
    pub fn illegal_param(message: impl Into<String>) -> Self {
        Self::IllegalParam(message.into())
    }

    /// Create a client timeout error.
    #[must_use]
    pub fn client_timeout(message: impl Into<String>) -> Self {
        Self::ClientTimeout(message.into())
    }

    /// Create a dial failure error.
    #[must_use]
    pub fn dial_failed(message: impl Into<String>) -> Self {
        Self::DialFailed(message.into())
    }

    /// Create a pass-through transport error.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if this is an illegal parameter error.
    #[must_use]
    pub const fn is_illegal_param(&self) -> bool {
        matches!(self, Self::IllegalParam(_))
    }

    /// Returns `true` if the client deadline was exceeded.
    #[must_use]
    pub const fn is_client_timeout(&self) -> bool {
        matches!(self, Self::ClientTimeout(_))
    }

    /// Returns `true` if the connection could not be established.
    #[must_use]
    pub const fn is_dial_failed(&self) -> bool {
        matches!(self, Self::DialFailed(_))
    }

    /// Returns `true` if the server answered with a gateway timeout.
    #[must_use]
    pub const fn is_server_timeout(&self) -> bool {
        matches!(self, Self::ServerTimeout)
    }

    /// Returns `true` if a response body could not be decoded.
    #[must_use]
    pub const fn is_decode(&self) -> bool {
        matches!(self, Self::JsonDeserialization { .. })
    }

    /// Returns the decoded error payload if the server reported one.
    #[must_use]
    pub const fn code_error(&self) -> Option<&CodeError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }
}
