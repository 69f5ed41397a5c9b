//! Lines of a budget, their activity correspondances and revenue sources.
//!
//! Every operation first resolves the parent budget through the caller's scope,
//! so children of an invisible budget are reported as a missing budget.

use chrono::Utc;
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_domain::audit::AuditKind;

use crate::domain::repository::{AuditRepository, BudgetRepository};
use crate::domain::types::{AuditAction, Correspondance, LigneBudgetaire, SourceRecette};
use crate::error::ApiError;

use super::budget::visible_budget;
use super::{non_negative, optional_text, required_text};

fn checked_percentage(pourcentage: f64) -> Result<f64, ApiError> {
    if !(0.0..=100.0).contains(&pourcentage) {
        return Err(ApiError::InvalidPercentage);
    }
    Ok(pourcentage)
}

async fn visible_ligne<B: BudgetRepository>(
    budgets: &B,
    caller: &AuthIdentity,
    budget_id: Uuid,
    ligne_id: Uuid,
) -> Result<LigneBudgetaire, ApiError> {
    let budget = visible_budget(budgets, caller, budget_id).await?;
    budgets
        .find_ligne(budget.id, ligne_id)
        .await?
        .ok_or(ApiError::LigneBudgetaireNotFound)
}

// ── CreateLigne ──────────────────────────────────────────────────────────────

pub struct CreateLigneInput {
    pub code: String,
    pub libelle: String,
    pub montant_prevu: Option<f64>,
    pub chapitre: Option<String>,
    pub section: Option<String>,
    pub paragraphe: Option<String>,
    pub article: Option<String>,
    pub nbe_ligne: Option<String>,
}

pub struct CreateLigneUseCase<B: BudgetRepository, A: AuditRepository> {
    pub budgets: B,
    pub audit: A,
}

impl<B: BudgetRepository, A: AuditRepository> CreateLigneUseCase<B, A> {
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        budget_id: Uuid,
        input: CreateLigneInput,
    ) -> Result<LigneBudgetaire, ApiError> {
        let budget = visible_budget(&self.budgets, caller, budget_id).await?;
        let now = Utc::now();
        let ligne = LigneBudgetaire {
            id: Uuid::now_v7(),
            budget_id: budget.id,
            code: required_text(input.code)?,
            libelle: required_text(input.libelle)?,
            montant_prevu: non_negative(input.montant_prevu.unwrap_or(0.0))?,
            chapitre: optional_text(input.chapitre),
            section: optional_text(input.section),
            paragraphe: optional_text(input.paragraphe),
            article: optional_text(input.article),
            nbe_ligne: optional_text(input.nbe_ligne),
            created_at: now,
            updated_at: now,
        };
        self.budgets.create_ligne(&ligne).await?;
        self.audit
            .record(
                &AuditAction::new(
                    caller.user_id,
                    AuditKind::Create,
                    "lignes_budgetaires",
                    ligne.id,
                )
                .with_description(format!("ligne {} du budget {}", ligne.code, budget.code)),
            )
            .await?;
        Ok(ligne)
    }
}

// ── UpdateLigne ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateLigneInput {
    pub code: Option<String>,
    pub libelle: Option<String>,
    pub montant_prevu: Option<f64>,
    pub chapitre: Option<String>,
    pub section: Option<String>,
    pub paragraphe: Option<String>,
    pub article: Option<String>,
    pub nbe_ligne: Option<String>,
}

pub struct UpdateLigneUseCase<B: BudgetRepository, A: AuditRepository> {
    pub budgets: B,
    pub audit: A,
}

impl<B: BudgetRepository, A: AuditRepository> UpdateLigneUseCase<B, A> {
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        budget_id: Uuid,
        ligne_id: Uuid,
        input: UpdateLigneInput,
    ) -> Result<LigneBudgetaire, ApiError> {
        let mut ligne = visible_ligne(&self.budgets, caller, budget_id, ligne_id).await?;
        if let Some(code) = input.code {
            ligne.code = required_text(code)?;
        }
        if let Some(libelle) = input.libelle {
            ligne.libelle = required_text(libelle)?;
        }
        if let Some(montant) = input.montant_prevu {
            ligne.montant_prevu = non_negative(montant)?;
        }
        if input.chapitre.is_some() {
            ligne.chapitre = optional_text(input.chapitre);
        }
        if input.section.is_some() {
            ligne.section = optional_text(input.section);
        }
        if input.paragraphe.is_some() {
            ligne.paragraphe = optional_text(input.paragraphe);
        }
        if input.article.is_some() {
            ligne.article = optional_text(input.article);
        }
        if input.nbe_ligne.is_some() {
            ligne.nbe_ligne = optional_text(input.nbe_ligne);
        }
        ligne.updated_at = Utc::now();

        self.budgets.update_ligne(&ligne).await?;
        self.audit
            .record(&AuditAction::new(
                caller.user_id,
                AuditKind::Update,
                "lignes_budgetaires",
                ligne.id,
            ))
            .await?;
        Ok(ligne)
    }
}

// ── DeleteLigne ──────────────────────────────────────────────────────────────

pub struct DeleteLigneUseCase<B: BudgetRepository, A: AuditRepository> {
    pub budgets: B,
    pub audit: A,
}

impl<B: BudgetRepository, A: AuditRepository> DeleteLigneUseCase<B, A> {
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        budget_id: Uuid,
        ligne_id: Uuid,
    ) -> Result<(), ApiError> {
        let budget = visible_budget(&self.budgets, caller, budget_id).await?;
        if !self.budgets.delete_ligne(budget.id, ligne_id).await? {
            return Err(ApiError::LigneBudgetaireNotFound);
        }
        self.audit
            .record(&AuditAction::new(
                caller.user_id,
                AuditKind::Delete,
                "lignes_budgetaires",
                ligne_id,
            ))
            .await
    }
}

// ── CreateCorrespondance ─────────────────────────────────────────────────────

pub struct CreateCorrespondanceInput {
    pub code_activite: String,
    pub nom_activite: String,
    pub categorie: String,
    pub sous_categorie: Option<String>,
    pub pourcentage: Option<f64>,
    pub montant_max: Option<f64>,
    pub priorite: Option<i32>,
}

pub struct CreateCorrespondanceUseCase<B: BudgetRepository, A: AuditRepository> {
    pub budgets: B,
    pub audit: A,
}

impl<B: BudgetRepository, A: AuditRepository> CreateCorrespondanceUseCase<B, A> {
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        budget_id: Uuid,
        ligne_id: Uuid,
        input: CreateCorrespondanceInput,
    ) -> Result<Correspondance, ApiError> {
        let pourcentage = checked_percentage(input.pourcentage.unwrap_or(100.0))?;
        let montant_max = input.montant_max.map(non_negative).transpose()?;
        let ligne = visible_ligne(&self.budgets, caller, budget_id, ligne_id).await?;

        let correspondance = Correspondance {
            id: Uuid::now_v7(),
            ligne_budgetaire_id: ligne.id,
            code_activite: required_text(input.code_activite)?,
            nom_activite: required_text(input.nom_activite)?,
            categorie: required_text(input.categorie)?,
            sous_categorie: optional_text(input.sous_categorie),
            pourcentage,
            montant_max,
            priorite: input.priorite.unwrap_or(0),
            valide: false,
            valide_par: None,
            valide_le: None,
            created_at: Utc::now(),
        };
        self.budgets.create_correspondance(&correspondance).await?;
        self.audit
            .record(
                &AuditAction::new(
                    caller.user_id,
                    AuditKind::Create,
                    "correspondances_activites",
                    correspondance.id,
                )
                .with_description(format!(
                    "activité {} sur ligne {}",
                    correspondance.code_activite, ligne.code
                )),
            )
            .await?;
        Ok(correspondance)
    }
}

// ── ValidateCorrespondance ───────────────────────────────────────────────────

pub struct ValidateCorrespondanceUseCase<B: BudgetRepository, A: AuditRepository> {
    pub budgets: B,
    pub audit: A,
}

impl<B: BudgetRepository, A: AuditRepository> ValidateCorrespondanceUseCase<B, A> {
    /// Mark the correspondance valid (recording who and when) or clear it.
    /// Only supervisors may validate.
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        budget_id: Uuid,
        ligne_id: Uuid,
        correspondance_id: Uuid,
        valide: bool,
    ) -> Result<Correspondance, ApiError> {
        if !caller.role.is_supervisor() {
            return Err(ApiError::Forbidden);
        }
        let ligne = visible_ligne(&self.budgets, caller, budget_id, ligne_id).await?;
        let mut correspondance = self
            .budgets
            .find_correspondance(ligne.id, correspondance_id)
            .await?
            .ok_or(ApiError::CorrespondanceNotFound)?;

        correspondance.valide = valide;
        if valide {
            correspondance.valide_par = Some(caller.user_id);
            correspondance.valide_le = Some(Utc::now());
        } else {
            correspondance.valide_par = None;
            correspondance.valide_le = None;
        }
        self.budgets.update_correspondance(&correspondance).await?;

        let kind = if valide {
            AuditKind::Validate
        } else {
            AuditKind::Update
        };
        self.audit
            .record(&AuditAction::new(
                caller.user_id,
                kind,
                "correspondances_activites",
                correspondance.id,
            ))
            .await?;
        Ok(correspondance)
    }
}

// ── DeleteCorrespondance ─────────────────────────────────────────────────────

pub struct DeleteCorrespondanceUseCase<B: BudgetRepository, A: AuditRepository> {
    pub budgets: B,
    pub audit: A,
}

impl<B: BudgetRepository, A: AuditRepository> DeleteCorrespondanceUseCase<B, A> {
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        budget_id: Uuid,
        ligne_id: Uuid,
        correspondance_id: Uuid,
    ) -> Result<(), ApiError> {
        let ligne = visible_ligne(&self.budgets, caller, budget_id, ligne_id).await?;
        if !self
            .budgets
            .delete_correspondance(ligne.id, correspondance_id)
            .await?
        {
            return Err(ApiError::CorrespondanceNotFound);
        }
        self.audit
            .record(&AuditAction::new(
                caller.user_id,
                AuditKind::Delete,
                "correspondances_activites",
                correspondance_id,
            ))
            .await
    }
}

// ── CreateSource ─────────────────────────────────────────────────────────────

pub struct CreateSourceInput {
    pub libelle: String,
    pub nature: Option<String>,
    pub montant: f64,
}

pub struct CreateSourceUseCase<B: BudgetRepository, A: AuditRepository> {
    pub budgets: B,
    pub audit: A,
}

impl<B: BudgetRepository, A: AuditRepository> CreateSourceUseCase<B, A> {
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        budget_id: Uuid,
        input: CreateSourceInput,
    ) -> Result<SourceRecette, ApiError> {
        let budget = visible_budget(&self.budgets, caller, budget_id).await?;
        let source = SourceRecette {
            id: Uuid::now_v7(),
            budget_id: budget.id,
            libelle: required_text(input.libelle)?,
            nature: optional_text(input.nature),
            montant: non_negative(input.montant)?,
            created_at: Utc::now(),
        };
        self.budgets.create_source(&source).await?;
        self.audit
            .record(&AuditAction::new(
                caller.user_id,
                AuditKind::Create,
                "sources_recettes",
                source.id,
            ))
            .await?;
        Ok(source)
    }
}

// ── DeleteSource ─────────────────────────────────────────────────────────────

pub struct DeleteSourceUseCase<B: BudgetRepository, A: AuditRepository> {
    pub budgets: B,
    pub audit: A,
}

impl<B: BudgetRepository, A: AuditRepository> DeleteSourceUseCase<B, A> {
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        budget_id: Uuid,
        source_id: Uuid,
    ) -> Result<(), ApiError> {
        let budget = visible_budget(&self.budgets, caller, budget_id).await?;
        if !self.budgets.delete_source(budget.id, source_id).await? {
            return Err(ApiError::SourceRecetteNotFound);
        }
        self.audit
            .record(&AuditAction::new(
                caller.user_id,
                AuditKind::Delete,
                "sources_recettes",
                source_id,
            ))
            .await
    }
}
