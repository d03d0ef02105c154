//! Error types for the chirp client.
//!
//! One unified error type with explicit variants for every failure class a
//! user action can run into: local validation, authentication, structured
//! API rejections, malformed server responses and network failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for chirp operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Rejected locally before any request was sent.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid credentials or a rejected token.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Structured 4xx response carrying a backend message.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Non-JSON or 5xx response.
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    /// No response was received.
    #[error("network error: {0}")]
    Network(#[from] NetworkError),

    /// The credential token could not be persisted or removed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Malformed base address or identifier.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns true if the backend refused the credential token.
    pub fn is_token_rejected(&self) -> bool {
        matches!(self, Error::Auth(AuthError::TokenRejected { .. }))
    }

    /// Human-readable text suitable for a user-facing notification.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(e) => e.to_string(),
            Error::Auth(AuthError::InvalidCredentials { message }) => message
                .clone()
                .unwrap_or_else(|| "Invalid username or password.".to_string()),
            Error::Auth(AuthError::TokenRejected { .. }) => {
                "Your session has expired. Please log in again.".to_string()
            }
            Error::Auth(AuthError::NotAuthenticated) => {
                "You need to log in first.".to_string()
            }
            Error::Api(e) => e.message.clone(),
            Error::Server(e) => format!(
                "The server returned an unexpected response (HTTP {}).",
                e.status
            ),
            Error::Network(NetworkError::Timeout { .. }) => {
                "The server took too long to respond.".to_string()
            }
            Error::Network(_) => "Could not reach the server.".to_string(),
            Error::Storage(_) => "Could not save your session locally.".to_string(),
            Error::InvalidInput(e) => e.to_string(),
        }
    }
}

/// Client-side validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Password and its confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// A required field was left blank.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// Text exceeds the allowed number of characters.
    #[error("{field} is limited to {max} characters (got {actual})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the submitted username/password.
    #[error("invalid credentials{}", suffix(.message))]
    InvalidCredentials { message: Option<String> },

    /// The backend answered 401 to a token-authenticated request.
    #[error("token rejected{}", suffix(.message))]
    TokenRejected { message: Option<String> },

    /// The operation needs a session but no token is stored.
    #[error("not authenticated")]
    NotAuthenticated,
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// A structured 4xx rejection from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Message extracted from the response body.
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

/// A response the client could not interpret as an API answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    /// HTTP status code.
    pub status: u16,
    /// Description of what was wrong with the response.
    pub message: String,
}

impl ServerError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

impl std::error::Error for ServerError {}

/// Transport-level failures.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Connection could not be established.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Any other failure while sending or receiving.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Token persistence failures.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct StorageError {
    pub message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Input validation errors for addresses and identifiers.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base address.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid numeric identifier.
    #[error("invalid id '{value}': {reason}")]
    Id { value: String, reason: String },

    /// A request body could not be built.
    #[error("invalid request: {reason}")]
    Request { reason: String },
}
