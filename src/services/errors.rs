//! Errors surfaced by the service layer.

use thiserror::Error;

use crate::forms::FormError;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Request parameters failed validation; no query was executed.
    #[error("invalid request: {0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    #[error("not found")]
    NotFound,

    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Errors caused by the caller rather than by infrastructure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::Form(_) | ServiceError::TypeConstraint(_) | ServiceError::NotFound
        )
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::ConnectionError(message) => ServiceError::Connection(message),
            RepositoryError::ValidationError(message) => ServiceError::TypeConstraint(message),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}
