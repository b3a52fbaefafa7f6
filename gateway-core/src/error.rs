use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Error taxonomy shared by every gateway endpoint.
///
/// The first five kinds are the authentication/authorization contract;
/// the rest cover the surrounding request plumbing. Internal faults
/// (database, configuration, anything wrapped in `ServerError`) all
/// render as a generic `ServerError` body so no internals leak.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No authentication credentials were provided")]
    MissingCredentials,

    #[error("Invalid identifier or password")]
    InvalidCredentials,

    #[error("Session token is invalid or has expired")]
    InvalidSession,

    #[error("Forbidden: {0}")]
    Forbidden(anyhow::Error),

    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(anyhow::Error),

    #[error("Not found: {0}")]
    NotFound(anyhow::Error),

    #[error("Conflict: {0}")]
    Conflict(anyhow::Error),

    #[error("Too many requests: {0}")]
    TooManyRequests(String, Option<u64>),

    #[error("Database error: {0}")]
    DatabaseError(anyhow::Error),

    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("Internal server error: {0}")]
    ServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Wire-level error kind, serialized as the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingCredentials => "MissingCredentials",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::InvalidSession => "InvalidSession",
            AppError::Forbidden(_) => "Forbidden",
            AppError::ValidationError(_) => "ValidationError",
            AppError::BadRequest(_) => "BadRequest",
            AppError::NotFound(_) => "NotFound",
            AppError::Conflict(_) => "Conflict",
            AppError::TooManyRequests(_, _) => "TooManyRequests",
            AppError::DatabaseError(_) | AppError::ConfigError(_) | AppError::ServerError(_) => {
                "ServerError"
            }
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ServerError(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorBody {
            #[serde(rename = "type")]
            kind: &'static str,
            message: String,
        }

        let kind = self.kind();
        let (status, message, retry_after) = match self {
            AppError::MissingCredentials => (
                StatusCode::UNAUTHORIZED,
                "No authentication credentials were provided".to_string(),
                None,
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid identifier or password".to_string(),
                None,
            ),
            AppError::InvalidSession => (
                StatusCode::UNAUTHORIZED,
                "Session token is invalid or has expired".to_string(),
                None,
            ),
            AppError::Forbidden(err) => (StatusCode::FORBIDDEN, err.to_string(), None),
            AppError::ValidationError(err) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string(), None)
            }
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            AppError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string(), None),
            AppError::Conflict(err) => (StatusCode::CONFLICT, err.to_string(), None),
            AppError::TooManyRequests(msg, retry) => (StatusCode::TOO_MANY_REQUESTS, msg, retry),
            AppError::DatabaseError(err)
            | AppError::ConfigError(err)
            | AppError::ServerError(err) => {
                tracing::error!(error = %err, "Internal fault");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        let mut res = (status, Json(ErrorBody { kind, message })).into_response();

        if let Some(retry) = retry_after {
            res.headers_mut()
                .insert(axum::http::header::RETRY_AFTER, retry.into());
        }

        res
    }
}
