use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_domain::user::UserRole;

use crate::error::ApiError;
use crate::handlers::UserResponse;
use crate::state::AppState;
use crate::usecase::auth::{
    ChangePasswordInput, ChangePasswordUseCase, GetMeUseCase, LoginInput, LoginUseCase,
};

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Shape consumed by the dashboard's credentials provider.
#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub access_token_exp: u64,
    pub user: SessionUser,
    #[serde(rename = "mustChangePassword")]
    pub must_change_password: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
    pub prenom: String,
    pub nom: String,
    pub role: UserRole,
    pub centre_id: Option<Uuid>,
    pub regisseur_id: Option<Uuid>,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        audit: state.audit_repo(),
        jwt_secret: state.jwt_secret.0.to_string(),
        ttl_secs: state.jwt_ttl_secs,
    };
    let output = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    let user = output.user;
    Ok(Json(LoginResponse {
        access_token: output.access_token,
        access_token_exp: output.access_token_exp,
        must_change_password: user.must_change_password,
        user: SessionUser {
            id: user.id,
            email: user.email,
            prenom: user.prenom,
            nom: user.nom,
            role: user.role,
            centre_id: user.centre_id,
            regisseur_id: user.regisseur_id,
        },
    }))
}

// ── GET /auth/me ─────────────────────────────────────────────────────────────

pub async fn get_me(
    identity: AuthIdentity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, ApiError> {
    let usecase = GetMeUseCase {
        users: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── POST /auth/change-password ───────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

pub async fn change_password(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, ApiError> {
    let usecase = ChangePasswordUseCase {
        users: state.user_repo(),
        audit: state.audit_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            ChangePasswordInput {
                current_password: body.current_password,
                new_password: body.new_password,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
