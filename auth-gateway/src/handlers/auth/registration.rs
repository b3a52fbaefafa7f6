use axum::{extract::State, http::StatusCode, Json};
use gateway_core::error::AppError;

use crate::{
    dtos::{auth::SignupRequest, ErrorResponse},
    models::SanitizedUser,
    utils::validation::ValidatedJson,
    AppState,
};

/// Register a new account.
#[utoipa::path(
    post,
    path = "/users/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = SanitizedUser),
        (status = 409, description = "Identifier already registered", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> Result<(StatusCode, Json<SanitizedUser>), AppError> {
    let user = state.auth_service.signup(payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}
