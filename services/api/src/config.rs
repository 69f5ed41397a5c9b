use cgcs_auth_types::token::ACCESS_TOKEN_TTL_SECS;

/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HS256 secret used to sign and validate access tokens.
    pub jwt_secret: String,
    /// TCP port for the HTTP server (default 3001). Env var: `API_PORT`.
    pub api_port: u16,
    /// Access-token lifetime in seconds (default 86400). Env var: `JWT_TTL_SECS`.
    pub jwt_ttl_secs: u64,
    /// Allowed dashboard origin. Any origin is allowed when unset.
    pub cors_origin: Option<String>,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3001),
            jwt_ttl_secs: std::env::var("JWT_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(ACCESS_TOKEN_TTL_SECS),
            cors_origin: std::env::var("CORS_ORIGIN")
                .ok()
                .filter(|v| !v.trim().is_empty()),
        }
    }
}
