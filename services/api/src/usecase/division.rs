use chrono::Utc;
use uuid::Uuid;

use cgcs_domain::audit::AuditKind;
use cgcs_domain::division::DivisionKey;
use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::{AuditRepository, DivisionRepository};
use crate::domain::types::{AuditAction, Division, DivisionFilter};
use crate::error::ApiError;

use super::{optional_text, required_text};

const ENTITY: &str = "divisions_administratives";

fn key_of(division: &Division) -> DivisionKey {
    DivisionKey::new(
        &division.region,
        &division.departement,
        &division.chef_lieu,
        &division.sous_prefecture,
        &division.commune,
    )
}

/// Fails when another row already carries the same five-field key.
async fn ensure_unique<D: DivisionRepository>(
    divisions: &D,
    division: &Division,
) -> Result<(), ApiError> {
    match divisions.find_by_key(&key_of(division)).await? {
        Some(existing) if existing.id != division.id => Err(ApiError::DivisionAlreadyExists),
        _ => Ok(()),
    }
}

// ── ListDivisions ────────────────────────────────────────────────────────────

pub struct ListDivisionsUseCase<D: DivisionRepository> {
    pub divisions: D,
}

impl<D: DivisionRepository> ListDivisionsUseCase<D> {
    pub async fn execute(
        &self,
        filter: DivisionFilter,
        page: PageRequest,
    ) -> Result<Vec<Division>, ApiError> {
        self.divisions.list(&filter, page.clamped()).await
    }
}

// ── ListRegions ──────────────────────────────────────────────────────────────

pub struct ListRegionsUseCase<D: DivisionRepository> {
    pub divisions: D,
}

impl<D: DivisionRepository> ListRegionsUseCase<D> {
    pub async fn execute(&self) -> Result<Vec<String>, ApiError> {
        self.divisions.regions().await
    }
}

// ── GetDivision ──────────────────────────────────────────────────────────────

pub struct GetDivisionUseCase<D: DivisionRepository> {
    pub divisions: D,
}

impl<D: DivisionRepository> GetDivisionUseCase<D> {
    pub async fn execute(&self, id: Uuid) -> Result<Division, ApiError> {
        self.divisions
            .find_by_id(id)
            .await?
            .ok_or(ApiError::DivisionNotFound)
    }
}

// ── CreateDivision ───────────────────────────────────────────────────────────

pub struct CreateDivisionInput {
    pub region: String,
    pub departement: String,
    pub chef_lieu: String,
    pub sous_prefecture: String,
    pub commune: String,
    pub code: Option<String>,
    pub active: Option<bool>,
}

pub struct CreateDivisionUseCase<D: DivisionRepository, A: AuditRepository> {
    pub divisions: D,
    pub audit: A,
}

impl<D: DivisionRepository, A: AuditRepository> CreateDivisionUseCase<D, A> {
    pub async fn execute(
        &self,
        actor: Uuid,
        input: CreateDivisionInput,
    ) -> Result<Division, ApiError> {
        let now = Utc::now();
        let division = Division {
            id: Uuid::now_v7(),
            region: required_text(input.region)?,
            departement: required_text(input.departement)?,
            chef_lieu: required_text(input.chef_lieu)?,
            sous_prefecture: required_text(input.sous_prefecture)?,
            commune: required_text(input.commune)?,
            code: optional_text(input.code),
            active: input.active.unwrap_or(true),
            created_at: now,
            updated_at: now,
        };
        ensure_unique(&self.divisions, &division).await?;
        self.divisions.create(&division).await?;
        self.audit
            .record(
                &AuditAction::new(actor, AuditKind::Create, ENTITY, division.id)
                    .with_description(format!("{} / {}", division.region, division.commune)),
            )
            .await?;
        Ok(division)
    }
}

// ── UpdateDivision ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateDivisionInput {
    pub region: Option<String>,
    pub departement: Option<String>,
    pub chef_lieu: Option<String>,
    pub sous_prefecture: Option<String>,
    pub commune: Option<String>,
    pub code: Option<String>,
    pub active: Option<bool>,
}

pub struct UpdateDivisionUseCase<D: DivisionRepository, A: AuditRepository> {
    pub divisions: D,
    pub audit: A,
}

impl<D: DivisionRepository, A: AuditRepository> UpdateDivisionUseCase<D, A> {
    pub async fn execute(
        &self,
        actor: Uuid,
        id: Uuid,
        input: UpdateDivisionInput,
    ) -> Result<Division, ApiError> {
        let mut division = self
            .divisions
            .find_by_id(id)
            .await?
            .ok_or(ApiError::DivisionNotFound)?;
        if let Some(region) = input.region {
            division.region = required_text(region)?;
        }
        if let Some(departement) = input.departement {
            division.departement = required_text(departement)?;
        }
        if let Some(chef_lieu) = input.chef_lieu {
            division.chef_lieu = required_text(chef_lieu)?;
        }
        if let Some(sous_prefecture) = input.sous_prefecture {
            division.sous_prefecture = required_text(sous_prefecture)?;
        }
        if let Some(commune) = input.commune {
            division.commune = required_text(commune)?;
        }
        if input.code.is_some() {
            division.code = optional_text(input.code);
        }
        if let Some(active) = input.active {
            division.active = active;
        }
        division.updated_at = Utc::now();

        ensure_unique(&self.divisions, &division).await?;
        self.divisions.update(&division).await?;
        self.audit
            .record(&AuditAction::new(actor, AuditKind::Update, ENTITY, id))
            .await?;
        Ok(division)
    }
}

// ── DeleteDivision ───────────────────────────────────────────────────────────

pub struct DeleteDivisionUseCase<D: DivisionRepository, A: AuditRepository> {
    pub divisions: D,
    pub audit: A,
}

impl<D: DivisionRepository, A: AuditRepository> DeleteDivisionUseCase<D, A> {
    pub async fn execute(&self, actor: Uuid, id: Uuid) -> Result<(), ApiError> {
        if !self.divisions.delete(id).await? {
            return Err(ApiError::DivisionNotFound);
        }
        self.audit
            .record(&AuditAction::new(actor, AuditKind::Delete, ENTITY, id))
            .await
    }
}
