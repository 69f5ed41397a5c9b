use axum::http::HeaderValue;
use sea_orm::Database;
use tracing::info;

use cgcs_api::config::ApiConfig;
use cgcs_api::router::{build_router, cors_layer};
use cgcs_api::state::AppState;
use cgcs_auth_types::identity::JwtSecret;
use cgcs_core::health::StartedAt;

#[tokio::main]
async fn main() {
    cgcs_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let cors_origin = config
        .cors_origin
        .as_deref()
        .map(|origin| HeaderValue::from_str(origin).expect("invalid CORS_ORIGIN"));

    let state = AppState {
        db,
        jwt_secret: JwtSecret::new(config.jwt_secret),
        jwt_ttl_secs: config.jwt_ttl_secs,
        started_at: StartedAt::now(),
    };

    let router = build_router(state).layer(cors_layer(cors_origin));
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("cgcs api listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
