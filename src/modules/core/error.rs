//! Error types for the HBnB API

use thiserror::Error;

/// Main error type for HBnB operations
#[derive(Error, Debug)]
pub enum HbnbError {
    /// Referenced entity (city, place, user, amenity) does not exist
    #[error("Not found")]
    NotFound,

    /// Request body is not a JSON object
    #[error("Not a JSON")]
    NotJson,

    /// Required body field is absent
    #[error("Missing {0}")]
    MissingField(String),

    /// Body field has a value of the wrong type
    #[error("Invalid {0}")]
    InvalidField(String),

    /// Configuration file parsing error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage engine error
    #[error("Storage error: {0}")]
    Storage(String),

    /// HTTP server error
    #[error("Server error: {0}")]
    Server(String),

    /// Environment variable not found
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    /// File system error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HbnbError {
    /// Shorthand for [`HbnbError::MissingField`]
    pub fn missing(field: impl Into<String>) -> Self {
        HbnbError::MissingField(field.into())
    }

    /// Shorthand for [`HbnbError::InvalidField`]
    pub fn invalid(field: impl Into<String>) -> Self {
        HbnbError::InvalidField(field.into())
    }

    /// Returns true if this error should be logged at error level
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            HbnbError::Storage(_)
                | HbnbError::Server(_)
                | HbnbError::Io(_)
                | HbnbError::Json(_)
                | HbnbError::Internal(_)
        )
    }

    /// Returns true if this error is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            HbnbError::NotFound
                | HbnbError::NotJson
                | HbnbError::MissingField(_)
                | HbnbError::InvalidField(_)
        )
    }

    /// Returns the appropriate HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            HbnbError::NotFound => 404,
            HbnbError::NotJson | HbnbError::MissingField(_) | HbnbError::InvalidField(_) => 400,
            _ => 500,
        }
    }

    /// Sanitize the error message to avoid leaking sensitive information
    pub fn sanitized_message(&self) -> String {
        match self {
            // Don't expose connection details or file paths
            HbnbError::Storage(_) | HbnbError::Io(_) => "Storage error".to_string(),

            // Don't expose internal details
            HbnbError::Internal(_) | HbnbError::Json(_) => "Internal server error".to_string(),

            // Client errors are already phrased for the response body
            _ => self.to_string(),
        }
    }
}

/// Result type alias using HbnbError
pub type Result<T> = std::result::Result<T, HbnbError>;
