use chrono::Utc;
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_domain::audit::AuditKind;
use cgcs_domain::budget::BudgetStatus;
use cgcs_domain::pagination::PageRequest;
use cgcs_domain::user::UserRole;

use crate::domain::repository::{AuditRepository, BudgetRepository, CentreRepository};
use crate::domain::types::{AuditAction, Budget, BudgetDetail, BudgetFilter, BudgetScope};
use crate::error::ApiError;

use super::{non_negative, optional_text, required_text};

const ENTITY: &str = "budgets";

/// Fiscal years accepted on budgets.
const ANNEE_RANGE: std::ops::RangeInclusive<i32> = 2000..=2100;

/// Budgets visible to `caller`. Accounts not attached to a centre or régisseur
/// see nothing.
pub fn caller_scope(caller: &AuthIdentity) -> Result<BudgetScope, ApiError> {
    BudgetScope::for_caller(caller.role, caller.centre_id, caller.regisseur_id)
        .ok_or(ApiError::Forbidden)
}

/// The budget, provided it exists and `caller` may see it.
pub(crate) async fn visible_budget<B: BudgetRepository>(
    budgets: &B,
    caller: &AuthIdentity,
    id: Uuid,
) -> Result<Budget, ApiError> {
    let scope = caller_scope(caller)?;
    budgets
        .find_by_id(id, scope)
        .await?
        .ok_or(ApiError::BudgetNotFound)
}

fn checked_annee(annee: i32) -> Result<i32, ApiError> {
    if !ANNEE_RANGE.contains(&annee) {
        return Err(ApiError::InvalidValue);
    }
    Ok(annee)
}

// ── ListBudgets ──────────────────────────────────────────────────────────────

pub struct ListBudgetsUseCase<B: BudgetRepository> {
    pub budgets: B,
}

impl<B: BudgetRepository> ListBudgetsUseCase<B> {
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        filter: BudgetFilter,
        page: PageRequest,
    ) -> Result<Vec<Budget>, ApiError> {
        let scope = caller_scope(caller)?;
        self.budgets.list(scope, &filter, page.clamped()).await
    }
}

// ── GetBudget ────────────────────────────────────────────────────────────────

pub struct GetBudgetUseCase<B: BudgetRepository> {
    pub budgets: B,
}

impl<B: BudgetRepository> GetBudgetUseCase<B> {
    pub async fn execute(&self, caller: &AuthIdentity, id: Uuid) -> Result<BudgetDetail, ApiError> {
        let budget = visible_budget(&self.budgets, caller, id).await?;
        let lignes = self.budgets.lignes(budget.id).await?;
        let sources = self.budgets.sources(budget.id).await?;
        Ok(BudgetDetail {
            budget,
            lignes,
            sources,
        })
    }
}

// ── CreateBudget ─────────────────────────────────────────────────────────────

pub struct CreateBudgetInput {
    pub code: String,
    pub nom: String,
    pub annee: i32,
    pub type_budget: String,
    pub centre_id: Uuid,
    pub montant_total: Option<f64>,
    pub montant_valide: Option<f64>,
    pub description: Option<String>,
}

pub struct CreateBudgetUseCase<B: BudgetRepository, C: CentreRepository, A: AuditRepository> {
    pub budgets: B,
    pub centres: C,
    pub audit: A,
}

impl<B: BudgetRepository, C: CentreRepository, A: AuditRepository> CreateBudgetUseCase<B, C, A> {
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        input: CreateBudgetInput,
    ) -> Result<Budget, ApiError> {
        let centre = self
            .centres
            .find_by_id(input.centre_id)
            .await?
            .ok_or(ApiError::CentreNotFound)?;
        let allowed = match caller.role {
            UserRole::Admin => true,
            UserRole::Regisseur => {
                caller.regisseur_id.is_some() && centre.regisseur_id == caller.regisseur_id
            }
            UserRole::ChefCentre => caller.centre_id == Some(centre.id),
        };
        if !allowed {
            return Err(ApiError::Forbidden);
        }

        let now = Utc::now();
        let mut budget = Budget {
            id: Uuid::now_v7(),
            code: required_text(input.code)?,
            nom: required_text(input.nom)?,
            annee: checked_annee(input.annee)?,
            type_budget: required_text(input.type_budget)?,
            statut: BudgetStatus::Brouillon,
            montant_total: non_negative(input.montant_total.unwrap_or(0.0))?,
            montant_valide: non_negative(input.montant_valide.unwrap_or(0.0))?,
            montant_restant: 0.0,
            description: optional_text(input.description),
            centre_id: centre.id,
            cree_par: caller.user_id,
            created_at: now,
            updated_at: now,
        };
        budget.refresh_restant();

        self.budgets.create(&budget).await?;
        self.audit
            .record(
                &AuditAction::new(caller.user_id, AuditKind::Create, ENTITY, budget.id)
                    .with_description(format!("budget {} ({})", budget.code, budget.annee)),
            )
            .await?;
        Ok(budget)
    }
}

// ── UpdateBudget ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateBudgetInput {
    pub nom: Option<String>,
    pub annee: Option<i32>,
    pub type_budget: Option<String>,
    pub statut: Option<BudgetStatus>,
    pub montant_total: Option<f64>,
    pub montant_valide: Option<f64>,
    pub description: Option<String>,
}

pub struct UpdateBudgetUseCase<B: BudgetRepository, A: AuditRepository> {
    pub budgets: B,
    pub audit: A,
}

impl<B: BudgetRepository, A: AuditRepository> UpdateBudgetUseCase<B, A> {
    pub async fn execute(
        &self,
        caller: &AuthIdentity,
        id: Uuid,
        input: UpdateBudgetInput,
    ) -> Result<Budget, ApiError> {
        let mut budget = visible_budget(&self.budgets, caller, id).await?;
        let previous_statut = budget.statut;

        if let Some(statut) = input.statut {
            if !statut.settable_by(caller.role) {
                return Err(ApiError::Forbidden);
            }
            budget.statut = statut;
        }
        if let Some(nom) = input.nom {
            budget.nom = required_text(nom)?;
        }
        if let Some(annee) = input.annee {
            budget.annee = checked_annee(annee)?;
        }
        if let Some(type_budget) = input.type_budget {
            budget.type_budget = required_text(type_budget)?;
        }
        if let Some(total) = input.montant_total {
            budget.montant_total = non_negative(total)?;
        }
        if let Some(valide) = input.montant_valide {
            budget.montant_valide = non_negative(valide)?;
        }
        if input.description.is_some() {
            budget.description = optional_text(input.description);
        }
        budget.refresh_restant();
        budget.updated_at = Utc::now();

        self.budgets.update(&budget).await?;
        let mut action = AuditAction::new(caller.user_id, AuditKind::Update, ENTITY, id);
        if budget.statut != previous_statut {
            action = action.with_description(format!(
                "statut {} -> {}",
                previous_statut, budget.statut
            ));
        }
        self.audit.record(&action).await?;
        Ok(budget)
    }
}

// ── DeleteBudget ─────────────────────────────────────────────────────────────

pub struct DeleteBudgetUseCase<B: BudgetRepository, A: AuditRepository> {
    pub budgets: B,
    pub audit: A,
}

impl<B: BudgetRepository, A: AuditRepository> DeleteBudgetUseCase<B, A> {
    pub async fn execute(&self, caller: &AuthIdentity, id: Uuid) -> Result<(), ApiError> {
        let budget = visible_budget(&self.budgets, caller, id).await?;
        if !self.budgets.delete(budget.id).await? {
            return Err(ApiError::BudgetNotFound);
        }
        self.audit
            .record(
                &AuditAction::new(caller.user_id, AuditKind::Delete, ENTITY, id)
                    .with_description(format!("budget {}", budget.code)),
            )
            .await
    }
}
