//! Typed failure taxonomy for the lifecycle services
//!
//! Four domain kinds the transport layer can map straight to a status code,
//! plus an opaque variant for unexpected document-store failures. Nothing is
//! retried here; the caller decides.

pub type QaResult<T> = Result<T, QaError>;

/// Errors surfaced by the question lifecycle services
#[derive(Debug, thiserror::Error)]
pub enum QaError {
    /// A required field is missing, malformed, or outside its bounds
    #[error("{0}")]
    Validation(String),

    /// A question, answer, or user id did not resolve
    #[error("{0}")]
    NotFound(String),

    /// The operation is forbidden by the entity's current status
    #[error("{0}")]
    InvalidState(String),

    /// The caller lacks the capability the operation requires
    #[error("{0}")]
    Authorization(String),

    /// Unexpected document-store failure
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl QaError {
    pub fn validation(message: impl Into<String>) -> Self {
        QaError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        QaError::NotFound(message.into())
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        QaError::InvalidState(message.into())
    }

    pub fn authorization(message: impl Into<String>) -> Self {
        QaError::Authorization(message.into())
    }

    /// HTTP status the (external) routing layer maps this error to
    pub fn http_status(&self) -> u16 {
        match self {
            QaError::Validation(_) | QaError::InvalidState(_) => 400,
            QaError::Authorization(_) => 403,
            QaError::NotFound(_) => 404,
            QaError::Store(_) => 500,
        }
    }
}
