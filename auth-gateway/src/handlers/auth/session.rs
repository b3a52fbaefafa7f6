use axum::{extract::State, Extension, Json};
use gateway_core::error::AppError;

use crate::{
    dtos::{
        auth::{LoginRequest, LogoutResponse, TokenResponse},
        ErrorResponse,
    },
    middleware::BearerToken,
    utils::validation::ValidatedJson,
    AppState,
};

/// Verify credentials and issue a session token.
#[utoipa::path(
    post,
    path = "/users/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session issued", body = TokenResponse),
        (status = 401, description = "Unknown identifier or wrong password", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let response = state.auth_service.login(payload).await?;

    Ok(Json(response))
}

/// Revoke the presented token.
///
/// Revocation is idempotent: a second logout with the same token, or a
/// token that never existed, still answers 200.
#[utoipa::path(
    post,
    path = "/users/logout",
    tag = "auth",
    security(("bearer_token" = [])),
    responses(
        (status = 200, description = "Token revoked (or already dead)", body = LogoutResponse),
        (status = 401, description = "No bearer token presented", body = ErrorResponse)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    token: Option<Extension<BearerToken>>,
) -> Result<Json<LogoutResponse>, AppError> {
    let Extension(BearerToken(token)) = token.ok_or_else(|| {
        AppError::ServerError(anyhow::anyhow!("Bearer token missing from extensions"))
    })?;

    state.auth_service.logout(&token).await?;

    Ok(Json(LogoutResponse { logged_out: true }))
}
