mod common;

use auth_gateway::models::{Role, Session};
use auth_gateway::services::SessionStore;
use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_json, login, send_json, send_with_token, signup, test_app, test_state};
use serde_json::json;
use tower::util::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn login_issues_a_token_that_resolves_to_the_signup_role() {
    let (state, _) = test_state();
    let app = test_app(state);

    let user = signup(&app, "254700000001", "hunter2", "agent").await;
    assert_eq!(user["role"], "agent");
    assert!(user.get("password_hash").is_none());

    let token = login(&app, "254700000001", "hunter2", "agent").await;

    let response = send_with_token(&app, "GET", "/whoami", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["role"], "agent");
    assert_eq!(body["user_id"], user["id"]);
}

#[tokio::test]
async fn wrong_password_and_unknown_identifier_fail_identically() {
    let (state, _) = test_state();
    let app = test_app(state);

    signup(&app, "254700000002", "correct", "customer").await;

    let wrong_password = send_json(
        &app,
        "POST",
        "/users/login",
        json!({ "identifier": "254700000002", "password": "incorrect" }),
    )
    .await;
    let unknown_user = send_json(
        &app,
        "POST",
        "/users/login",
        json!({ "identifier": "254799999999", "password": "whatever" }),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_user).await;
    assert_eq!(a["type"], "InvalidCredentials");
    assert_eq!(a, b);
}

#[tokio::test]
async fn duplicate_signup_conflicts() {
    let (state, _) = test_state();
    let app = test_app(state);

    signup(&app, "254700000003", "first", "customer").await;

    let response = send_json(
        &app,
        "POST",
        "/users/signup",
        json!({ "phone_number": "254700000003", "password": "second", "role": "customer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn logout_revokes_and_is_idempotent() {
    let (state, _) = test_state();
    let app = test_app(state);

    let token = login(&app, "254700000004", "secret", "agent").await;

    // Token works before logout.
    let response = send_with_token(&app, "GET", "/whoami", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let first = send_with_token(&app, "POST", "/users/logout", Some(&token)).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await["logged_out"], true);

    // Second logout with the same dead token still succeeds.
    let second = send_with_token(&app, "POST", "/users/logout", Some(&token)).await;
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["logged_out"], true);

    // But the token never resolves again.
    let response = send_with_token(&app, "GET", "/whoami", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["type"], "InvalidSession");
}

#[tokio::test]
async fn logout_without_header_is_missing_credentials() {
    let (state, _) = test_state();
    let app = test_app(state);

    let response = send_with_token(&app, "POST", "/users/logout", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["type"], "MissingCredentials");
}

#[tokio::test]
async fn logout_with_a_never_issued_token_still_succeeds() {
    let (state, _) = test_state();
    let app = test_app(state);

    let response = send_with_token(&app, "POST", "/users/logout", Some("ghost-token")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["logged_out"], true);
}

#[tokio::test]
async fn expired_session_never_resolves() {
    let (state, sessions) = test_state();
    let app = test_app(state);

    let mut session = Session::new("stale-token".to_string(), Uuid::new_v4(), Role::Agent, None);
    session.expires_at = Some(Utc::now() - Duration::hours(1));
    sessions.put(&session).await.unwrap();

    let response = send_with_token(&app, "GET", "/whoami", Some("stale-token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["type"], "InvalidSession");
}

#[tokio::test]
async fn concurrent_logins_get_independent_sessions() {
    let (state, _) = test_state();
    let app = test_app(state);

    let first = login(&app, "254700000005", "secret", "provider").await;
    let second = login(&app, "254700000005", "secret", "provider").await;
    assert_ne!(first, second);

    // Revoking one leaves the other alive.
    let response = send_with_token(&app, "POST", "/users/logout", Some(&first)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_with_token(&app, "GET", "/whoami", Some(&second)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn password_update_requires_the_old_password() {
    let (state, _) = test_state();
    let app = test_app(state);

    let token = login(&app, "254700000006", "old-pass", "customer").await;

    let wrong = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/users/password/update")
                .header("Authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(axum::body::Body::from(
                    json!({ "old_password": "not-it", "new_password": "new-pass" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let right = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .method("POST")
                .uri("/users/password/update")
                .header("Authorization", format!("Bearer {}", token))
                .header("content-type", "application/json")
                .body(axum::body::Body::from(
                    json!({ "old_password": "old-pass", "new_password": "new-pass" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(right.status(), StatusCode::OK);
    assert_eq!(body_json(right).await["updated"], true);

    // Only the new password logs in now.
    let stale = send_json(
        &app,
        "POST",
        "/users/login",
        json!({ "identifier": "254700000006", "password": "old-pass" }),
    )
    .await;
    assert_eq!(stale.status(), StatusCode::UNAUTHORIZED);

    let fresh = send_json(
        &app,
        "POST",
        "/users/login",
        json!({ "identifier": "254700000006", "password": "new-pass" }),
    )
    .await;
    assert_eq!(fresh.status(), StatusCode::OK);
}
