mod common;

use axum::http::StatusCode;
use common::{body_json, login, send_with_token, test_app, test_state};

#[tokio::test]
async fn role_set_admits_listed_roles() {
    let (state, _) = test_state();
    let app = test_app(state);

    let provider = login(&app, "254711223344", "secret", "provider").await;
    let response = send_with_token(&app, "GET", "/providers/paginate", Some(&provider)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let admin = login(&app, "254700000010", "secret", "admin").await;
    let response = send_with_token(&app, "GET", "/providers/paginate", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn role_set_rejects_unlisted_roles_with_forbidden() {
    let (state, _) = test_state();
    let app = test_app(state);

    let agent = login(&app, "254700000011", "secret", "agent").await;
    let response = send_with_token(&app, "GET", "/providers/paginate", Some(&agent)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let body = body_json(response).await;
    assert_eq!(body["type"], "Forbidden");
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn any_authenticated_admits_every_role() {
    let (state, _) = test_state();
    let app = test_app(state);

    for (identifier, role) in [
        ("254700000012", "admin"),
        ("254700000013", "provider"),
        ("254700000014", "agent"),
        ("254700000015", "customer"),
    ] {
        let token = login(&app, identifier, "secret", role).await;
        let response = send_with_token(&app, "GET", "/whoami", Some(&token)).await;
        assert_eq!(response.status(), StatusCode::OK, "role {role} was rejected");
    }
}

#[tokio::test]
async fn single_role_set_locks_out_everyone_else() {
    let (state, _) = test_state();
    let app = test_app(state);

    let customer = login(&app, "254700000016", "secret", "customer").await;
    let response = send_with_token(&app, "GET", "/admin/settings", Some(&customer)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let admin = login(&app, "254700000017", "secret", "admin").await;
    let response = send_with_token(&app, "GET", "/admin/settings", Some(&admin)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn end_to_end_provider_flow() {
    let (state, _) = test_state();
    let app = test_app(state);

    // A bogus token is turned away before any role check runs.
    let response = send_with_token(&app, "GET", "/providers/paginate", Some("bogus")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["type"], "InvalidSession");

    // Register, log in and hit the protected listing.
    let token = login(&app, "254711223344", "secret", "provider").await;
    let response = send_with_token(&app, "GET", "/providers/paginate", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Logout kills the token for the same route.
    let response = send_with_token(&app, "POST", "/users/logout", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send_with_token(&app, "GET", "/providers/paginate", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["type"], "InvalidSession");
}
