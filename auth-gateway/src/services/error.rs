use gateway_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Unknown identifier and wrong password collapse into this one
    /// error so a caller cannot tell which check failed.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session is not valid")]
    InvalidSession,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Store error: {0}")]
    Store(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => AppError::InvalidCredentials,
            ServiceError::InvalidSession => AppError::InvalidSession,
            ServiceError::UserAlreadyExists => {
                AppError::Conflict(anyhow::anyhow!("User already exists"))
            }
            ServiceError::UserNotFound => AppError::NotFound(anyhow::anyhow!("User not found")),
            ServiceError::Store(e) => AppError::DatabaseError(e),
        }
    }
}
