use axum::http::{HeaderName, HeaderValue, StatusCode, header::AUTHORIZATION};
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use uuid::Uuid;

use cgcs_api::router::build_router;
use cgcs_api::state::AppState;
use cgcs_auth_types::identity::JwtSecret;
use cgcs_core::health::StartedAt;
use cgcs_testing::auth::MockAuth;

use crate::helpers::TEST_JWT_SECRET;

/// Server over a disconnected database: only requests rejected before any
/// query can be exercised.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
        jwt_ttl_secs: 3600,
        started_at: StartedAt::now(),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_report_health_without_token() {
    let response = server().get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn should_echo_request_id() {
    let response = server().get("/api/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn should_reject_missing_bearer() {
    let response = server().get("/api/budgets").await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_token_signed_with_another_secret() {
    let auth = MockAuth::admin();
    let (token, _) = cgcs_auth_types::token::issue_access_token(
        &auth.identity,
        "some-other-secret",
        chrono::Utc::now().timestamp() as u64,
        3600,
    )
    .unwrap();

    let response = server()
        .get("/api/auth/me")
        .add_header(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        )
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_chef_on_admin_routes() {
    let (name, value): (HeaderName, HeaderValue) = MockAuth::chef_centre(Uuid::now_v7()).header();
    let server = server();

    for path in [
        "/api/admin/centres",
        "/api/admin/regisseurs",
        "/api/admin/chefs-centres",
        "/api/admin/audit-actions",
    ] {
        let response = server
            .get(path)
            .add_header(name.clone(), value.clone())
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        let body: Value = response.json();
        assert_eq!(body["kind"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn should_forbid_regisseur_creating_division() {
    let (name, value) = MockAuth::regisseur(Uuid::now_v7()).header();

    let response = server()
        .post("/api/divisions-administratives")
        .add_header(name, value)
        .json(&json!({
            "region": "Poro",
            "departement": "Korhogo",
            "chefLieu": "Korhogo",
            "sousPrefecture": "Korhogo",
            "commune": "Korhogo",
        }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_forbid_chef_validating_correspondance() {
    let (name, value) = MockAuth::chef_centre(Uuid::now_v7()).header();
    let path = format!(
        "/api/budgets/{}/lignes/{}/correspondances/{}/validation",
        Uuid::now_v7(),
        Uuid::now_v7(),
        Uuid::now_v7()
    );

    let response = server()
        .patch(&path)
        .add_header(name, value)
        .json(&json!({ "valide": true }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}
