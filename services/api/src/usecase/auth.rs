use chrono::Utc;
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_auth_types::token::issue_access_token;
use cgcs_domain::audit::AuditKind;
use cgcs_domain::user::UserStatus;

use crate::domain::repository::{AuditRepository, UserRepository};
use crate::domain::types::{AuditAction, User, normalize_email};
use crate::error::ApiError;
use crate::password::{hash_password, is_acceptable, spend_verification, verify_password};

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: String,
    pub access_token_exp: u64,
    pub user: User,
}

pub struct LoginUseCase<U: UserRepository, A: AuditRepository> {
    pub users: U,
    pub audit: A,
    pub jwt_secret: String,
    pub ttl_secs: u64,
}

impl<U: UserRepository, A: AuditRepository> LoginUseCase<U, A> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        let email = normalize_email(&input.email);
        if email.is_empty() || input.password.is_empty() {
            return Err(ApiError::InvalidCredentials);
        }
        // Unknown email and wrong password are indistinguishable to the caller,
        // in body and in time.
        let Some(user) = self.users.find_by_email(&email).await? else {
            spend_verification(&input.password);
            return Err(ApiError::InvalidCredentials);
        };
        if !verify_password(&input.password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }
        if user.status != UserStatus::Active {
            return Err(ApiError::AccountDisabled);
        }

        let now = Utc::now();
        let identity = AuthIdentity {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            centre_id: user.centre_id,
            regisseur_id: user.regisseur_id,
        };
        let (access_token, access_token_exp) = issue_access_token(
            &identity,
            &self.jwt_secret,
            now.timestamp().max(0) as u64,
            self.ttl_secs,
        )
        .map_err(|e| ApiError::Internal(e.into()))?;

        self.users.touch_last_login(user.id, now).await?;
        self.audit
            .record(&AuditAction::new(user.id, AuditKind::Login, "users", user.id))
            .await?;

        Ok(LoginOutput {
            access_token,
            access_token_exp,
            user: User {
                last_login_at: Some(now),
                ..user
            },
        })
    }
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetMeUseCase<U> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}

// ── ChangePassword ───────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub current_password: String,
    pub new_password: String,
}

pub struct ChangePasswordUseCase<U: UserRepository, A: AuditRepository> {
    pub users: U,
    pub audit: A,
}

impl<U: UserRepository, A: AuditRepository> ChangePasswordUseCase<U, A> {
    pub async fn execute(&self, user_id: Uuid, input: ChangePasswordInput) -> Result<(), ApiError> {
        if !is_acceptable(&input.new_password) {
            return Err(ApiError::InvalidPassword);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;
        if !verify_password(&input.current_password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }
        let hash = hash_password(&input.new_password)?;
        self.users.set_password(user.id, &hash).await?;
        self.audit
            .record(&AuditAction::new(
                user.id,
                AuditKind::PasswordChange,
                "users",
                user.id,
            ))
            .await
    }
}
