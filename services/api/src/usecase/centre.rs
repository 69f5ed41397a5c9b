use chrono::Utc;
use uuid::Uuid;

use cgcs_domain::audit::AuditKind;
use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::{
    AuditRepository, CentreRepository, RegisseurRepository, UserRepository,
};
use crate::domain::types::{AuditAction, Centre, CentreFilter, User};
use crate::error::ApiError;

use super::{optional_text, required_text};

const ENTITY: &str = "centres";

// ── ListCentres ──────────────────────────────────────────────────────────────

pub struct ListCentresUseCase<C: CentreRepository> {
    pub centres: C,
}

impl<C: CentreRepository> ListCentresUseCase<C> {
    pub async fn execute(
        &self,
        filter: CentreFilter,
        page: PageRequest,
    ) -> Result<Vec<Centre>, ApiError> {
        self.centres.list(&filter, page.clamped()).await
    }
}

// ── GetCentre ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct CentreDetail {
    pub centre: Centre,
    pub chef_centre: Option<User>,
}

pub struct GetCentreUseCase<C: CentreRepository, U: UserRepository> {
    pub centres: C,
    pub users: U,
}

impl<C: CentreRepository, U: UserRepository> GetCentreUseCase<C, U> {
    pub async fn execute(&self, id: Uuid) -> Result<CentreDetail, ApiError> {
        let centre = self
            .centres
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CentreNotFound)?;
        let chef_centre = self.users.find_chef_of_centre(id).await?;
        Ok(CentreDetail {
            centre,
            chef_centre,
        })
    }
}

// ── CreateCentre ─────────────────────────────────────────────────────────────

pub struct CreateCentreInput {
    pub code: String,
    pub nom: String,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub commune: Option<String>,
    pub departement: Option<String>,
    pub region: String,
    pub type_centre: String,
    pub niveau: Option<String>,
    pub telephone: Option<String>,
    pub active: Option<bool>,
    pub regisseur_id: Option<Uuid>,
}

pub struct CreateCentreUseCase<C: CentreRepository, R: RegisseurRepository, A: AuditRepository> {
    pub centres: C,
    pub regisseurs: R,
    pub audit: A,
}

impl<C: CentreRepository, R: RegisseurRepository, A: AuditRepository>
    CreateCentreUseCase<C, R, A>
{
    pub async fn execute(&self, actor: Uuid, input: CreateCentreInput) -> Result<Centre, ApiError> {
        if let Some(regisseur_id) = input.regisseur_id {
            ensure_regisseur_exists(&self.regisseurs, regisseur_id).await?;
        }
        let now = Utc::now();
        let centre = Centre {
            id: Uuid::now_v7(),
            code: required_text(input.code)?,
            nom: required_text(input.nom)?,
            adresse: optional_text(input.adresse),
            ville: optional_text(input.ville),
            commune: optional_text(input.commune),
            departement: optional_text(input.departement),
            region: required_text(input.region)?,
            type_centre: required_text(input.type_centre)?,
            niveau: optional_text(input.niveau),
            telephone: optional_text(input.telephone),
            active: input.active.unwrap_or(true),
            regisseur_id: input.regisseur_id,
            created_at: now,
            updated_at: now,
        };
        self.centres.create(&centre).await?;
        self.audit
            .record(
                &AuditAction::new(actor, AuditKind::Create, ENTITY, centre.id)
                    .with_description(format!("centre {}", centre.code)),
            )
            .await?;
        Ok(centre)
    }
}

// ── UpdateCentre ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateCentreInput {
    pub code: Option<String>,
    pub nom: Option<String>,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub commune: Option<String>,
    pub departement: Option<String>,
    pub region: Option<String>,
    pub type_centre: Option<String>,
    pub niveau: Option<String>,
    pub telephone: Option<String>,
    pub active: Option<bool>,
    pub regisseur_id: Option<Uuid>,
}

pub struct UpdateCentreUseCase<
    C: CentreRepository,
    R: RegisseurRepository,
    U: UserRepository,
    A: AuditRepository,
> {
    pub centres: C,
    pub regisseurs: R,
    pub users: U,
    pub audit: A,
}

impl<C: CentreRepository, R: RegisseurRepository, U: UserRepository, A: AuditRepository>
    UpdateCentreUseCase<C, R, U, A>
{
    pub async fn execute(
        &self,
        actor: Uuid,
        id: Uuid,
        input: UpdateCentreInput,
    ) -> Result<Centre, ApiError> {
        let mut centre = self
            .centres
            .find_by_id(id)
            .await?
            .ok_or(ApiError::CentreNotFound)?;
        let new_regisseur = match input.regisseur_id {
            Some(regisseur_id) if centre.regisseur_id != Some(regisseur_id) => {
                ensure_regisseur_exists(&self.regisseurs, regisseur_id).await?;
                centre.regisseur_id = Some(regisseur_id);
                Some(regisseur_id)
            }
            _ => None,
        };
        if let Some(code) = input.code {
            centre.code = required_text(code)?;
        }
        if let Some(nom) = input.nom {
            centre.nom = required_text(nom)?;
        }
        if let Some(region) = input.region {
            centre.region = required_text(region)?;
        }
        if let Some(type_centre) = input.type_centre {
            centre.type_centre = required_text(type_centre)?;
        }
        if input.adresse.is_some() {
            centre.adresse = optional_text(input.adresse);
        }
        if input.ville.is_some() {
            centre.ville = optional_text(input.ville);
        }
        if input.commune.is_some() {
            centre.commune = optional_text(input.commune);
        }
        if input.departement.is_some() {
            centre.departement = optional_text(input.departement);
        }
        if input.niveau.is_some() {
            centre.niveau = optional_text(input.niveau);
        }
        if input.telephone.is_some() {
            centre.telephone = optional_text(input.telephone);
        }
        if let Some(active) = input.active {
            centre.active = active;
        }
        centre.updated_at = Utc::now();

        self.centres.update(&centre).await?;
        if let Some(regisseur_id) = new_regisseur {
            self.users.follow_centre_regisseur(id, regisseur_id).await?;
        }
        self.audit
            .record(&AuditAction::new(actor, AuditKind::Update, ENTITY, id))
            .await?;
        Ok(centre)
    }
}

// ── DeleteCentre ─────────────────────────────────────────────────────────────

pub struct DeleteCentreUseCase<C: CentreRepository, A: AuditRepository> {
    pub centres: C,
    pub audit: A,
}

impl<C: CentreRepository, A: AuditRepository> DeleteCentreUseCase<C, A> {
    pub async fn execute(&self, actor: Uuid, id: Uuid) -> Result<(), ApiError> {
        if self.centres.find_by_id(id).await?.is_none() {
            return Err(ApiError::CentreNotFound);
        }
        if self.centres.is_referenced(id).await? {
            return Err(ApiError::EntityInUse);
        }
        if !self.centres.delete(id).await? {
            return Err(ApiError::CentreNotFound);
        }
        self.audit
            .record(&AuditAction::new(actor, AuditKind::Delete, ENTITY, id))
            .await
    }
}

async fn ensure_regisseur_exists<R: RegisseurRepository>(
    regisseurs: &R,
    id: Uuid,
) -> Result<(), ApiError> {
    match regisseurs.find_by_id(id).await? {
        Some(_) => Ok(()),
        None => Err(ApiError::RegisseurNotFound),
    }
}
