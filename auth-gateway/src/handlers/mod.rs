pub mod auth;
pub mod user;

use axum::Json;
use serde_json::{json, Value};

/// Open landing route so probes and load balancers get a 200.
#[utoipa::path(
    get,
    path = "/",
    tag = "meta",
    responses(
        (status = 200, description = "Service banner")
    )
)]
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
