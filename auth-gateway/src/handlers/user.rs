use axum::{extract::State, Json};
use gateway_core::error::AppError;

use crate::{
    dtos::{
        auth::{UpdatePasswordRequest, UpdatePasswordResponse},
        ErrorResponse,
    },
    middleware::AuthUser,
    utils::validation::ValidatedJson,
    AppState,
};

/// Rotate the caller's own password.
#[utoipa::path(
    post,
    path = "/users/password/update",
    tag = "users",
    security(("bearer_token" = [])),
    request_body = UpdatePasswordRequest,
    responses(
        (status = 200, description = "Password updated", body = UpdatePasswordResponse),
        (status = 401, description = "Old password did not match", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn update_password(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdatePasswordRequest>,
) -> Result<Json<UpdatePasswordResponse>, AppError> {
    state
        .auth_service
        .update_password(&principal, payload)
        .await?;

    Ok(Json(UpdatePasswordResponse { updated: true }))
}
