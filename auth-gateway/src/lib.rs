pub mod access;
pub mod config;
pub mod dtos;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use gateway_core::error::AppError;
use gateway_core::middleware::{
    rate_limit::{create_ip_rate_limiter, ip_rate_limit_middleware, IpRateLimiter},
    security_headers::security_headers_middleware,
    tracing::request_id_middleware,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::{openapi::security::SecurityScheme, Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::access::{OpenEndpoints, RouteAuthSpec};
use crate::config::GatewayConfig;
use crate::services::{AuthService, CredentialStore, SessionStore};

/// Revocation endpoint; the gate hands it the raw bearer token instead
/// of a resolved principal so revocation stays idempotent.
pub const LOGOUT_PATH: &str = "/users/logout";

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        handlers::index,
        handlers::auth::registration::signup,
        handlers::auth::session::login,
        handlers::auth::session::logout,
        handlers::user::update_password,
    ),
    components(
        schemas(
            dtos::ErrorResponse,
            dtos::auth::LoginRequest,
            dtos::auth::SignupRequest,
            dtos::auth::TokenResponse,
            dtos::auth::LogoutResponse,
            dtos::auth::UpdatePasswordRequest,
            dtos::auth::UpdatePasswordResponse,
            models::Role,
            models::SanitizedUser,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Session issuance and revocation"),
        (name = "users", description = "Account self-service"),
        (name = "meta", description = "Service metadata and health"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .build(),
                ),
            );
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: GatewayConfig,
    pub users: Arc<dyn CredentialStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub auth_service: AuthService,
    pub open_endpoints: OpenEndpoints,
    pub login_rate_limiter: IpRateLimiter,
    pub ip_rate_limiter: IpRateLimiter,
}

impl AppState {
    pub fn new(
        config: GatewayConfig,
        users: Arc<dyn CredentialStore>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let auth_service = AuthService::new(
            users.clone(),
            sessions.clone(),
            config.session.token_ttl_hours,
        );

        let mut open_endpoints = OpenEndpoints::default();
        if config.swagger_public() {
            open_endpoints = open_endpoints
                .with_prefix("/docs")
                .with_exact("/.well-known/openapi.json");
        }

        let login_rate_limiter = create_ip_rate_limiter(
            config.rate_limit.login_attempts,
            config.rate_limit.login_window_seconds,
        );
        let ip_rate_limiter = create_ip_rate_limiter(
            config.rate_limit.global_ip_limit,
            config.rate_limit.global_ip_window_seconds,
        );

        Self {
            config,
            users,
            sessions,
            auth_service,
            open_endpoints,
            login_rate_limiter,
            ip_rate_limiter,
        }
    }
}

/// Wrap a router in a role check that runs after authentication.
pub fn protect(router: Router<AppState>, spec: RouteAuthSpec) -> Router<AppState> {
    router.layer(from_fn_with_state(spec, middleware::access_control))
}

/// Assemble the full application router.
///
/// `resources` carries the proxied back-office routes; tests pass probe
/// routers here. Everything it contains sits behind the gate unless the
/// path is registered as open.
pub fn build_router(state: AppState, resources: Router<AppState>) -> Router {
    let login_limiter = state.login_rate_limiter.clone();
    let login_route = Router::new()
        .route("/users/login", post(handlers::auth::login))
        .layer(from_fn_with_state(login_limiter, ip_rate_limit_middleware));

    let mut app = Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(health_check));

    if state.config.swagger_enabled() {
        app =
            app.merge(SwaggerUi::new("/docs").url("/.well-known/openapi.json", ApiDoc::openapi()));
    }

    let ip_limiter = state.ip_rate_limiter.clone();

    app.route("/users/signup", post(handlers::auth::signup))
        .merge(login_route)
        // No role check on logout: the gate guarantees a bearer header
        // and the handler revokes without resolving.
        .route(LOGOUT_PATH, post(handlers::auth::logout))
        .merge(protect(
            Router::new().route(
                "/users/password/update",
                post(handlers::user::update_password),
            ),
            RouteAuthSpec::AnyAuthenticated,
        ))
        .merge(resources)
        .with_state(state.clone())
        .layer(from_fn_with_state(state.clone(), middleware::authenticate))
        .layer(from_fn_with_state(ip_limiter, ip_rate_limit_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(security_headers_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(
                    state
                        .config
                        .security
                        .allowed_origins
                        .iter()
                        .filter_map(|o| match o.parse::<axum::http::HeaderValue>() {
                            Ok(value) => Some(value),
                            Err(e) => {
                                tracing::error!("Invalid CORS origin '{}': {}. Skipping.", o, e);
                                None
                            }
                        })
                        .collect::<Vec<axum::http::HeaderValue>>(),
                )
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                ]),
        )
}

/// Service health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy"),
        (status = 503, description = "Service is unhealthy")
    ),
    tag = "meta"
)]
pub async fn health_check(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Result<axum::Json<serde_json::Value>, AppError> {
    state.sessions.health_check().await.map_err(|e| {
        tracing::error!(error = %e, "Session store health check failed");
        AppError::ServerError(e)
    })?;

    Ok(axum::Json(serde_json::json!({
        "status": "healthy",
        "service": state.config.service_name,
        "version": state.config.service_version,
        "environment": format!("{:?}", state.config.environment),
        "checks": {
            "store": "up"
        }
    })))
}
