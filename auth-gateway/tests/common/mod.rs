use std::sync::Arc;

use async_trait::async_trait;
use auth_gateway::{
    access::RouteAuthSpec,
    build_router,
    config::{
        DatabaseConfig, Environment, GatewayConfig, RateLimitConfig, SecurityConfig,
        SessionConfig, SwaggerConfig, SwaggerMode,
    },
    middleware::AuthUser,
    models::Session,
    protect,
    services::{InMemoryCredentialStore, InMemorySessionStore, SessionStore},
    AppState,
};
use axum::{
    body::Body,
    http::{Request, Response, StatusCode},
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

pub fn test_config() -> GatewayConfig {
    GatewayConfig {
        common: gateway_core::config::Config { port: 8080 },
        environment: Environment::Dev,
        service_name: "auth-gateway".to_string(),
        service_version: "test".to_string(),
        log_level: "error".to_string(),
        database: DatabaseConfig {
            url: String::new(),
        },
        session: SessionConfig {
            token_ttl_hours: None,
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        swagger: SwaggerConfig {
            enabled: SwaggerMode::Disabled,
        },
        // Generous limits so tests never trip the limiter.
        rate_limit: RateLimitConfig {
            login_attempts: 1000,
            login_window_seconds: 60,
            global_ip_limit: 10000,
            global_ip_window_seconds: 60,
        },
        otlp_endpoint: None,
    }
}

/// Session store whose backing has gone away; every call errors.
pub struct FailingSessionStore;

#[async_trait]
impl SessionStore for FailingSessionStore {
    async fn put(&self, _session: &Session) -> Result<(), anyhow::Error> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn get(&self, _token: &str) -> Result<Option<Session>, anyhow::Error> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn revoke(&self, _token: &str) -> Result<(), anyhow::Error> {
        Err(anyhow::anyhow!("connection refused"))
    }

    async fn health_check(&self) -> Result<(), anyhow::Error> {
        Err(anyhow::anyhow!("connection refused"))
    }
}

pub fn test_state() -> (AppState, Arc<InMemorySessionStore>) {
    let users = Arc::new(InMemoryCredentialStore::new());
    let sessions = Arc::new(InMemorySessionStore::new());
    let state = AppState::new(test_config(), users, sessions.clone());
    (state, sessions)
}

async fn whoami(AuthUser(principal): AuthUser) -> Json<Value> {
    Json(json!({
        "user_id": principal.user_id,
        "role": principal.role,
    }))
}

/// Gateway plus probe routes standing in for proxied back-office APIs.
pub fn test_app(state: AppState) -> Router {
    use auth_gateway::models::Role;

    let resources = Router::new()
        .merge(protect(
            Router::new().route(
                "/providers/paginate",
                get(|| async { Json(json!({ "providers": [], "page": 1 })) }),
            ),
            RouteAuthSpec::roles([Role::Admin, Role::Provider]),
        ))
        .merge(protect(
            Router::new().route("/whoami", get(whoami)),
            RouteAuthSpec::AnyAuthenticated,
        ))
        .merge(protect(
            Router::new().route("/admin/settings", get(|| async { "settings" })),
            RouteAuthSpec::roles([Role::Admin]),
        ));

    build_router(state, resources)
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn send_with_token(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {}", token));
    }
    app.clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn signup(app: &Router, identifier: &str, password: &str, role: &str) -> Value {
    let response = send_json(
        app,
        "POST",
        "/users/signup",
        json!({ "phone_number": identifier, "password": password, "role": role }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Sign up (ignoring duplicates) and log in, returning the token.
pub async fn login(app: &Router, identifier: &str, password: &str, role: &str) -> String {
    let _ = send_json(
        app,
        "POST",
        "/users/signup",
        json!({ "phone_number": identifier, "password": password, "role": role }),
    )
    .await;

    let response = send_json(
        app,
        "POST",
        "/users/login",
        json!({ "identifier": identifier, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    body["token"].as_str().unwrap().to_string()
}
