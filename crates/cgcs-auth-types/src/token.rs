//! JWT access tokens.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "TOKEN_ISSUER", test))]
use serde::Serialize;
use uuid::Uuid;

use cgcs_domain::user::UserRole;

use crate::identity::AuthIdentity;

/// Default access-token lifetime in seconds (24 hours).
pub const ACCESS_TOKEN_TTL_SECS: u64 = 86_400;

/// Identity extracted from a validated access token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub identity: AuthIdentity,
    pub exp: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("token signing failed")]
    Signing,
}

/// JWT claims payload.
///
/// | Field | Meaning |
/// |-------|---------|
/// | `sub` | user id (UUID string) |
/// | `email` | login email |
/// | `role` | `ADMIN`, `REGISSEUR` or `CHEF_CENTRE` |
/// | `centre_id` | centre of a chef de centre |
/// | `regisseur_id` | régisseur the account belongs to |
/// | `exp` | expiration, seconds since UNIX epoch |
///
/// [`Serialize`] requires the **`TOKEN_ISSUER`** cargo feature; only the API
/// service (and tests) sign tokens.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "TOKEN_ISSUER", test), derive(Serialize))]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub centre_id: Option<Uuid>,
    #[serde(default)]
    pub regisseur_id: Option<Uuid>,
    pub exp: u64,
}

/// Decode and validate a JWT, returning raw claims.
///
/// Validation: HS256, exp checked, required claims: `exp` + `sub`.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token value, returning the caller's identity.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    let user_id = claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| AuthError::Malformed)?;
    Ok(TokenInfo {
        identity: AuthIdentity {
            user_id,
            email: claims.email,
            role: claims.role,
            centre_id: claims.centre_id,
            regisseur_id: claims.regisseur_id,
        },
        exp: claims.exp,
    })
}

/// Sign an access token for `identity`, valid for `ttl_secs` from `now_secs`.
/// Returns the token and its expiration timestamp.
#[cfg(any(feature = "TOKEN_ISSUER", test))]
pub fn issue_access_token(
    identity: &AuthIdentity,
    secret: &str,
    now_secs: u64,
    ttl_secs: u64,
) -> Result<(String, u64), AuthError> {
    use jsonwebtoken::{EncodingKey, Header, encode};

    let exp = now_secs + ttl_secs;
    let claims = JwtClaims {
        sub: identity.user_id.to_string(),
        email: identity.email.clone(),
        role: identity.role,
        centre_id: identity.centre_id,
        regisseur_id: identity.regisseur_id,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::Signing)?;
    Ok((token, exp))
}
