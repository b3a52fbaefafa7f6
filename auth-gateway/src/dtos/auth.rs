use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{Role, SanitizedUser};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Phone number or email address.
    #[validate(length(min = 1, message = "Identifier is required"))]
    #[schema(example = "254711223344")]
    pub identifier: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret")]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Phone number is required"))]
    #[schema(example = "254711223344")]
    pub phone_number: String,

    // Short PINs are in active use, so only a floor of four.
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    #[schema(example = "secret", min_length = 4)]
    pub password: String,

    #[schema(example = "provider")]
    pub role: Role,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    #[schema(example = "ylHUMaVrS0dpcO-nT-6aAVVGcRJzu0JzWtpJkpMnjPE")]
    pub token: String,
    pub user: SanitizedUser,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LogoutResponse {
    #[schema(example = true)]
    pub logged_out: bool,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    #[schema(example = "1881468")]
    pub old_password: String,

    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    #[schema(example = "2654", min_length = 4)]
    pub new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatePasswordResponse {
    #[schema(example = true)]
    pub updated: bool,
}
