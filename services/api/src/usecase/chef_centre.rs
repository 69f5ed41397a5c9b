use chrono::Utc;
use uuid::Uuid;

use cgcs_domain::audit::AuditKind;
use cgcs_domain::pagination::PageRequest;
use cgcs_domain::user::{UserRole, UserStatus};

use crate::domain::repository::{AuditRepository, CentreRepository, UserRepository};
use crate::domain::types::{AuditAction, Centre, ChefCentreFilter, User, normalize_email};
use crate::error::ApiError;
use crate::password::{hash_password, is_acceptable};

use super::{optional_text, required_text};

const ENTITY: &str = "users";

// ── ListChefsCentres ─────────────────────────────────────────────────────────

pub struct ListChefsCentresUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ListChefsCentresUseCase<U> {
    pub async fn execute(
        &self,
        filter: ChefCentreFilter,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiError> {
        self.users.list_chefs(&filter, page.clamped()).await
    }
}

// ── GetChefCentre ────────────────────────────────────────────────────────────

pub struct GetChefCentreUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetChefCentreUseCase<U> {
    pub async fn execute(&self, id: Uuid) -> Result<User, ApiError> {
        find_chef(&self.users, id).await
    }
}

// ── CreateChefCentre ─────────────────────────────────────────────────────────

pub struct CreateChefCentreInput {
    pub email: String,
    pub password: String,
    pub nom: String,
    pub prenom: String,
    pub code: Option<String>,
    pub telephone: Option<String>,
    pub centre_id: Uuid,
}

pub struct CreateChefCentreUseCase<U: UserRepository, C: CentreRepository, A: AuditRepository> {
    pub users: U,
    pub centres: C,
    pub audit: A,
}

impl<U: UserRepository, C: CentreRepository, A: AuditRepository>
    CreateChefCentreUseCase<U, C, A>
{
    pub async fn execute(
        &self,
        actor: Uuid,
        input: CreateChefCentreInput,
    ) -> Result<User, ApiError> {
        if !is_acceptable(&input.password) {
            return Err(ApiError::InvalidPassword);
        }
        let email = normalize_email(&input.email);
        if email.is_empty() {
            return Err(ApiError::MissingData);
        }
        let centre = assignable_centre(&self.users, &self.centres, input.centre_id, None).await?;
        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiError::EmailAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            password_hash: hash_password(&input.password)?,
            nom: required_text(input.nom)?,
            prenom: required_text(input.prenom)?,
            role: UserRole::ChefCentre,
            status: UserStatus::Active,
            code: optional_text(input.code),
            telephone: optional_text(input.telephone),
            centre_id: Some(centre.id),
            regisseur_id: centre.regisseur_id,
            must_change_password: true,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        self.audit
            .record(
                &AuditAction::new(actor, AuditKind::Create, ENTITY, user.id)
                    .with_description(format!("chef de centre {}", centre.code)),
            )
            .await?;
        Ok(user)
    }
}

// ── UpdateChefCentre ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateChefCentreInput {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub telephone: Option<String>,
    pub code: Option<String>,
    pub status: Option<UserStatus>,
    pub centre_id: Option<Uuid>,
}

pub struct UpdateChefCentreUseCase<U: UserRepository, C: CentreRepository, A: AuditRepository> {
    pub users: U,
    pub centres: C,
    pub audit: A,
}

impl<U: UserRepository, C: CentreRepository, A: AuditRepository>
    UpdateChefCentreUseCase<U, C, A>
{
    pub async fn execute(
        &self,
        actor: Uuid,
        id: Uuid,
        input: UpdateChefCentreInput,
    ) -> Result<User, ApiError> {
        let mut user = find_chef(&self.users, id).await?;
        if let Some(centre_id) = input.centre_id {
            if user.centre_id != Some(centre_id) {
                let centre =
                    assignable_centre(&self.users, &self.centres, centre_id, Some(user.id)).await?;
                user.centre_id = Some(centre.id);
                user.regisseur_id = centre.regisseur_id;
            }
        }
        if let Some(nom) = input.nom {
            user.nom = required_text(nom)?;
        }
        if let Some(prenom) = input.prenom {
            user.prenom = required_text(prenom)?;
        }
        if input.telephone.is_some() {
            user.telephone = optional_text(input.telephone);
        }
        if input.code.is_some() {
            user.code = optional_text(input.code);
        }
        if let Some(status) = input.status {
            user.status = status;
        }
        user.updated_at = Utc::now();

        self.users.update(&user).await?;
        self.audit
            .record(&AuditAction::new(actor, AuditKind::Update, ENTITY, id))
            .await?;
        Ok(user)
    }
}

// ── DeleteChefCentre ─────────────────────────────────────────────────────────

pub struct DeleteChefCentreUseCase<U: UserRepository, A: AuditRepository> {
    pub users: U,
    pub audit: A,
}

impl<U: UserRepository, A: AuditRepository> DeleteChefCentreUseCase<U, A> {
    pub async fn execute(&self, actor: Uuid, id: Uuid) -> Result<(), ApiError> {
        find_chef(&self.users, id).await?;
        if self.users.has_created_budgets(id).await? {
            return Err(ApiError::EntityInUse);
        }
        if !self.users.delete(id).await? {
            return Err(ApiError::ChefCentreNotFound);
        }
        self.audit
            .record(&AuditAction::new(actor, AuditKind::Delete, ENTITY, id))
            .await
    }
}

async fn find_chef<U: UserRepository>(users: &U, id: Uuid) -> Result<User, ApiError> {
    users
        .find_by_id(id)
        .await?
        .filter(|u| u.role == UserRole::ChefCentre)
        .ok_or(ApiError::ChefCentreNotFound)
}

/// The centre, provided it exists and has no chef other than `current`.
async fn assignable_centre<U: UserRepository, C: CentreRepository>(
    users: &U,
    centres: &C,
    centre_id: Uuid,
    current: Option<Uuid>,
) -> Result<Centre, ApiError> {
    let centre = centres
        .find_by_id(centre_id)
        .await?
        .ok_or(ApiError::CentreNotFound)?;
    if let Some(chef) = users.find_chef_of_centre(centre_id).await? {
        if Some(chef.id) != current {
            return Err(ApiError::CentreAlreadyHasChef);
        }
    }
    Ok(centre)
}
