pub mod audit;
pub mod auth;
pub mod budget;
pub mod centre;
pub mod chef_centre;
pub mod division;
pub mod ligne;
pub mod nbe;
pub mod regisseur;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_domain::user::{UserRole, UserStatus};

use crate::domain::types::User;
use crate::error::ApiError;

/// Admin-only routes check the role before touching the database.
pub(crate) fn require_admin(identity: &AuthIdentity) -> Result<(), ApiError> {
    if identity.is_admin() {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

/// Account profile. Never carries the password hash.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub code: Option<String>,
    pub telephone: Option<String>,
    pub centre_id: Option<Uuid>,
    pub regisseur_id: Option<Uuid>,
    pub must_change_password: bool,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms_opt")]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nom: user.nom,
            prenom: user.prenom,
            role: user.role,
            status: user.status,
            code: user.code,
            telephone: user.telephone,
            centre_id: user.centre_id,
            regisseur_id: user.regisseur_id,
            must_change_password: user.must_change_password,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}
