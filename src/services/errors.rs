use thiserror::Error;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The user is not authorized to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Input was empty, malformed or violates a business rule.
    #[error("{0}")]
    Validation(String),
    /// Requested resource was not found.
    #[error("{0} not found")]
    NotFound(String),
    /// The operation clashes with the current state.
    #[error("{0}")]
    Conflict(String),
    /// The loan prediction service failed or timed out.
    #[error("external service error: {0}")]
    ExternalService(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;
