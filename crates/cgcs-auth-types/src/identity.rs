//! Bearer-token identity extractor.

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::response::{IntoResponse, Response};
use http::request::Parts;
use http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use uuid::Uuid;

use cgcs_domain::user::UserRole;

use crate::token::validate_access_token;

/// HMAC secret used to validate bearer tokens. Services expose it through
/// `FromRef` on their state.
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

/// Authenticated caller, decoded from `Authorization: Bearer <token>`.
///
/// Returns 401 when the header is absent or the token does not validate.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthIdentity {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
    pub centre_id: Option<Uuid>,
    pub regisseur_id: Option<Uuid>,
}

impl AuthIdentity {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Rejection produced by the [`AuthIdentity`] extractor.
#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid token")]
    InvalidToken,
}

impl AuthRejection {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingToken => "MISSING_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl<S> FromRequestParts<S> for AuthIdentity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = AuthRejection;

    // Validate synchronously and return a 'static future so the extractor does
    // not capture the borrowed request parts.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = match bearer_token(&parts.headers) {
            None => Err(AuthRejection::MissingToken),
            Some(token) => validate_access_token(token, &secret.0)
                .map(|info| info.identity)
                .map_err(|_| AuthRejection::InvalidToken),
        };
        async move { result }
    }
}
