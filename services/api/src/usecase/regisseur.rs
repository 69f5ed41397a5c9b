use chrono::Utc;
use uuid::Uuid;

use cgcs_domain::audit::AuditKind;
use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::{AuditRepository, RegisseurRepository};
use crate::domain::types::{AuditAction, Regisseur, RegisseurFilter};
use crate::error::ApiError;

use super::{optional_text, required_text};

const ENTITY: &str = "regisseurs";

// ── ListRegisseurs ───────────────────────────────────────────────────────────

pub struct ListRegisseursUseCase<R: RegisseurRepository> {
    pub regisseurs: R,
}

impl<R: RegisseurRepository> ListRegisseursUseCase<R> {
    pub async fn execute(
        &self,
        filter: RegisseurFilter,
        page: PageRequest,
    ) -> Result<Vec<Regisseur>, ApiError> {
        self.regisseurs.list(&filter, page.clamped()).await
    }
}

// ── GetRegisseur ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RegisseurDetail {
    pub regisseur: Regisseur,
    pub centre_count: u64,
}

pub struct GetRegisseurUseCase<R: RegisseurRepository> {
    pub regisseurs: R,
}

impl<R: RegisseurRepository> GetRegisseurUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<RegisseurDetail, ApiError> {
        let regisseur = self
            .regisseurs
            .find_by_id(id)
            .await?
            .ok_or(ApiError::RegisseurNotFound)?;
        let centre_count = self.regisseurs.count_centres(id).await?;
        Ok(RegisseurDetail {
            regisseur,
            centre_count,
        })
    }
}

// ── CreateRegisseur ──────────────────────────────────────────────────────────

pub struct CreateRegisseurInput {
    pub code: String,
    pub nom: String,
    pub prenom: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub region: String,
    pub active: Option<bool>,
}

pub struct CreateRegisseurUseCase<R: RegisseurRepository, A: AuditRepository> {
    pub regisseurs: R,
    pub audit: A,
}

impl<R: RegisseurRepository, A: AuditRepository> CreateRegisseurUseCase<R, A> {
    pub async fn execute(
        &self,
        actor: Uuid,
        input: CreateRegisseurInput,
    ) -> Result<Regisseur, ApiError> {
        let now = Utc::now();
        let regisseur = Regisseur {
            id: Uuid::now_v7(),
            code: required_text(input.code)?,
            nom: required_text(input.nom)?,
            prenom: required_text(input.prenom)?,
            email: optional_text(input.email).map(|e| e.to_lowercase()),
            telephone: optional_text(input.telephone),
            region: required_text(input.region)?,
            active: input.active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        self.regisseurs.create(&regisseur).await?;
        self.audit
            .record(
                &AuditAction::new(actor, AuditKind::Create, ENTITY, regisseur.id)
                    .with_description(format!("régisseur {}", regisseur.code)),
            )
            .await?;
        Ok(regisseur)
    }
}

// ── UpdateRegisseur ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateRegisseurInput {
    pub code: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub region: Option<String>,
    pub active: Option<bool>,
}

pub struct UpdateRegisseurUseCase<R: RegisseurRepository, A: AuditRepository> {
    pub regisseurs: R,
    pub audit: A,
}

impl<R: RegisseurRepository, A: AuditRepository> UpdateRegisseurUseCase<R, A> {
    pub async fn execute(
        &self,
        actor: Uuid,
        id: Uuid,
        input: UpdateRegisseurInput,
    ) -> Result<Regisseur, ApiError> {
        let mut regisseur = self
            .regisseurs
            .find_by_id(id)
            .await?
            .ok_or(ApiError::RegisseurNotFound)?;
        if let Some(code) = input.code {
            regisseur.code = required_text(code)?;
        }
        if let Some(nom) = input.nom {
            regisseur.nom = required_text(nom)?;
        }
        if let Some(prenom) = input.prenom {
            regisseur.prenom = required_text(prenom)?;
        }
        if input.email.is_some() {
            regisseur.email = optional_text(input.email).map(|e| e.to_lowercase());
        }
        if input.telephone.is_some() {
            regisseur.telephone = optional_text(input.telephone);
        }
        if let Some(region) = input.region {
            regisseur.region = required_text(region)?;
        }
        if let Some(active) = input.active {
            regisseur.active = active;
        }
        regisseur.updated_at = Utc::now();

        self.regisseurs.update(&regisseur).await?;
        self.audit
            .record(&AuditAction::new(actor, AuditKind::Update, ENTITY, id))
            .await?;
        Ok(regisseur)
    }
}

// ── DeleteRegisseur ──────────────────────────────────────────────────────────

pub struct DeleteRegisseurUseCase<R: RegisseurRepository, A: AuditRepository> {
    pub regisseurs: R,
    pub audit: A,
}

impl<R: RegisseurRepository, A: AuditRepository> DeleteRegisseurUseCase<R, A> {
    pub async fn execute(&self, actor: Uuid, id: Uuid) -> Result<(), ApiError> {
        if self.regisseurs.find_by_id(id).await?.is_none() {
            return Err(ApiError::RegisseurNotFound);
        }
        if self.regisseurs.is_referenced(id).await? {
            return Err(ApiError::EntityInUse);
        }
        if !self.regisseurs.delete(id).await? {
            return Err(ApiError::RegisseurNotFound);
        }
        self.audit
            .record(&AuditAction::new(actor, AuditKind::Delete, ENTITY, id))
            .await
    }
}
