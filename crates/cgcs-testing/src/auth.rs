//! Mock auth helpers for integration tests.
//!
//! `MockAuth` signs a real access token with the test secret so requests go
//! through the same `AuthIdentity` extractor as production traffic.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_auth_types::token::issue_access_token;
use cgcs_domain::user::UserRole;

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub identity: AuthIdentity,
}

impl MockAuth {
    pub fn new(role: UserRole) -> Self {
        Self {
            identity: AuthIdentity {
                user_id: Uuid::now_v7(),
                email: format!("{}@cgcs.test", role.as_str().to_lowercase()),
                role,
                centre_id: None,
                regisseur_id: None,
            },
        }
    }

    pub fn admin() -> Self {
        Self::new(UserRole::Admin)
    }

    pub fn regisseur(regisseur_id: Uuid) -> Self {
        let mut auth = Self::new(UserRole::Regisseur);
        auth.identity.regisseur_id = Some(regisseur_id);
        auth
    }

    pub fn chef_centre(centre_id: Uuid) -> Self {
        let mut auth = Self::new(UserRole::ChefCentre);
        auth.identity.centre_id = Some(centre_id);
        auth
    }

    /// A token signed with [`TEST_JWT_SECRET`], valid for one hour.
    pub fn token(&self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        let (token, _exp) = issue_access_token(&self.identity, TEST_JWT_SECRET, now, 3600)
            .expect("test token signing");
        token
    }

    /// `Authorization: Bearer <token>` header pair.
    pub fn header(&self) -> (HeaderName, HeaderValue) {
        let value = HeaderValue::from_str(&format!("Bearer {}", self.token()))
            .expect("bearer header value");
        (AUTHORIZATION, value)
    }
}
