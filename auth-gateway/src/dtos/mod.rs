pub mod auth;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wire shape of every gateway error.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error kind from the taxonomy, e.g. `InvalidSession`.
    #[serde(rename = "type")]
    #[schema(example = "InvalidCredentials")]
    pub kind: String,
    #[schema(example = "Invalid identifier or password")]
    pub message: String,
}
