//! Initial administrator account.

use anyhow::{Context, Result, bail};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use cgcs_api::domain::types::normalize_email;
use cgcs_api::password::{hash_password, is_acceptable};
use cgcs_api_schema::users;
use cgcs_domain::user::{UserRole, UserStatus};

pub struct AdminSeed {
    pub email: String,
    pub password: String,
    pub nom: String,
    pub prenom: String,
}

/// Create an active ADMIN account unless the email is already registered.
/// Returns whether a row was inserted.
pub async fn seed_admin(db: &DatabaseConnection, seed: AdminSeed) -> Result<bool> {
    let email = normalize_email(&seed.email);
    if email.is_empty() {
        bail!("email must not be empty");
    }
    if !is_acceptable(&seed.password) {
        bail!("password is too short");
    }

    let existing = users::Entity::find()
        .filter(users::Column::Email.eq(email.as_str()))
        .one(db)
        .await
        .context("find admin by email")?;
    if existing.is_some() {
        tracing::info!(%email, "user already exists, nothing to do");
        return Ok(false);
    }

    let now = Utc::now();
    users::ActiveModel {
        id: Set(Uuid::now_v7()),
        email: Set(email.clone()),
        password_hash: Set(hash_password(&seed.password)?),
        nom: Set(seed.nom),
        prenom: Set(seed.prenom),
        role: Set(UserRole::Admin.as_str().to_owned()),
        status: Set(UserStatus::Active.as_str().to_owned()),
        code: Set(None),
        telephone: Set(None),
        centre_id: Set(None),
        regisseur_id: Set(None),
        must_change_password: Set(false),
        last_login_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .context("insert admin")?;
    tracing::info!(%email, "admin created");
    Ok(true)
}
