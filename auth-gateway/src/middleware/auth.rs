//! The request gate: open-endpoint bypass, bearer extraction, session
//! validation and the per-route access decision.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use gateway_core::error::AppError;

use crate::{
    access::{self, AccessDenied, RouteAuthSpec},
    models::Principal,
    AppState, LOGOUT_PATH,
};

/// Raw bearer token, attached for the revocation endpoint only.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Global gate, layered over the whole router.
///
/// Open endpoints pass straight through with no principal. Everything
/// else must present a bearer token; the resolved principal rides the
/// request extensions into `access_control` and the handlers.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path().to_string();

    if state.open_endpoints.is_open(&path) {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(req.headers())
        .map(str::to_owned)
        .ok_or(AppError::MissingCredentials)?;

    if path == LOGOUT_PATH {
        // Revocation is idempotent and must not reveal whether the
        // token was ever live, so it gets the raw token unresolved.
        req.extensions_mut().insert(BearerToken(token));
        return Ok(next.run(req).await);
    }

    let principal = state.auth_service.resolve(&token).await?;
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

/// Per-route role enforcement; the spec was resolved at registration.
pub async fn access_control(
    State(spec): State<RouteAuthSpec>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let principal = req.extensions().get::<Principal>();

    match access::decide(&spec, principal) {
        Ok(()) => Ok(next.run(req).await),
        Err(AccessDenied::Unauthenticated) => Err(AppError::MissingCredentials),
        Err(AccessDenied::Forbidden) => {
            tracing::warn!(path = %req.uri().path(), "Role not permitted on this route");
            Err(AppError::Forbidden(anyhow::anyhow!(
                "Access denied for this role"
            )))
        }
    }
}

/// Extractor for handlers that need the resolved principal.
pub struct AuthUser(pub Principal);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let principal = parts.extensions.get::<Principal>().ok_or_else(|| {
            AppError::ServerError(anyhow::anyhow!(
                "Principal missing from request extensions"
            ))
        })?;

        Ok(AuthUser(*principal))
    }
}
