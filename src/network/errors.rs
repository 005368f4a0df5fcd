use std::fmt;

/// Failures of calls to the remote service.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The service rejected the submitted data.
    ValidationError(String),
    /// Credentials were refused or the token is not accepted.
    AuthError(String),
    /// The request never completed or came back with an unexpected status.
    NetworkError(String),
    /// The referenced identifier is unknown to the service.
    NotFoundError(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError(m) |
            ApiError::AuthError(m) |
            ApiError::NetworkError(m) |
            ApiError::NotFoundError(m) => m,
        }
    }
}

impl std::error::Error for ApiError {}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}
