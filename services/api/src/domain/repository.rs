#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use cgcs_domain::division::DivisionKey;
use cgcs_domain::pagination::PageRequest;

use crate::domain::types::{
    AuditAction, AuditFilter, Budget, BudgetFilter, BudgetScope, Centre, CentreFilter,
    ChefCentreFilter, Correspondance, Division, DivisionFilter, LigneBudgetaire, LigneDetail,
    NbeFilter, NbeLine, Regisseur, RegisseurFilter, SourceRecette, User,
};
use crate::error::ApiError;

/// Repository for login accounts (including chefs de centre).
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    /// `email` must already be normalized.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
    /// Persist profile fields (not the password hash or login timestamp).
    async fn update(&self, user: &User) -> Result<(), ApiError>;
    /// Store a new hash and clear `must_change_password`.
    async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError>;
    async fn touch_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), ApiError>;
    /// Delete a user. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    async fn list_chefs(
        &self,
        filter: &ChefCentreFilter,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiError>;
    async fn find_chef_of_centre(&self, centre_id: Uuid) -> Result<Option<User>, ApiError>;
    /// Point every user attached to `centre_id` at the centre's new régisseur.
    async fn follow_centre_regisseur(
        &self,
        centre_id: Uuid,
        regisseur_id: Uuid,
    ) -> Result<(), ApiError>;
    /// Whether the user is recorded as creator of any budget.
    async fn has_created_budgets(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for health centres.
pub trait CentreRepository: Send + Sync {
    async fn list(&self, filter: &CentreFilter, page: PageRequest)
    -> Result<Vec<Centre>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Centre>, ApiError>;
    async fn create(&self, centre: &Centre) -> Result<(), ApiError>;
    async fn update(&self, centre: &Centre) -> Result<(), ApiError>;
    /// Delete a centre. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    /// Whether users or budgets still reference the centre.
    async fn is_referenced(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for régisseurs.
pub trait RegisseurRepository: Send + Sync {
    async fn list(
        &self,
        filter: &RegisseurFilter,
        page: PageRequest,
    ) -> Result<Vec<Regisseur>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Regisseur>, ApiError>;
    async fn create(&self, regisseur: &Regisseur) -> Result<(), ApiError>;
    async fn update(&self, regisseur: &Regisseur) -> Result<(), ApiError>;
    /// Delete a régisseur. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
    async fn count_centres(&self, id: Uuid) -> Result<u64, ApiError>;
    /// Whether centres or users still reference the régisseur.
    async fn is_referenced(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for the budget aggregate: budgets, their lines, the
/// correspondances of each line and the revenue sources.
pub trait BudgetRepository: Send + Sync {
    async fn list(
        &self,
        scope: BudgetScope,
        filter: &BudgetFilter,
        page: PageRequest,
    ) -> Result<Vec<Budget>, ApiError>;
    /// `None` when the budget does not exist or lies outside `scope`.
    async fn find_by_id(&self, id: Uuid, scope: BudgetScope) -> Result<Option<Budget>, ApiError>;
    async fn create(&self, budget: &Budget) -> Result<(), ApiError>;
    async fn update(&self, budget: &Budget) -> Result<(), ApiError>;
    /// Delete a budget with its lines and sources. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;

    async fn lignes(&self, budget_id: Uuid) -> Result<Vec<LigneDetail>, ApiError>;
    async fn find_ligne(
        &self,
        budget_id: Uuid,
        ligne_id: Uuid,
    ) -> Result<Option<LigneBudgetaire>, ApiError>;
    async fn create_ligne(&self, ligne: &LigneBudgetaire) -> Result<(), ApiError>;
    async fn update_ligne(&self, ligne: &LigneBudgetaire) -> Result<(), ApiError>;
    async fn delete_ligne(&self, budget_id: Uuid, ligne_id: Uuid) -> Result<bool, ApiError>;

    async fn find_correspondance(
        &self,
        ligne_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Correspondance>, ApiError>;
    async fn create_correspondance(&self, correspondance: &Correspondance)
    -> Result<(), ApiError>;
    async fn update_correspondance(&self, correspondance: &Correspondance)
    -> Result<(), ApiError>;
    async fn delete_correspondance(&self, ligne_id: Uuid, id: Uuid) -> Result<bool, ApiError>;

    async fn sources(&self, budget_id: Uuid) -> Result<Vec<SourceRecette>, ApiError>;
    async fn create_source(&self, source: &SourceRecette) -> Result<(), ApiError>;
    async fn delete_source(&self, budget_id: Uuid, id: Uuid) -> Result<bool, ApiError>;
}

/// Repository for administrative divisions.
pub trait DivisionRepository: Send + Sync {
    async fn list(
        &self,
        filter: &DivisionFilter,
        page: PageRequest,
    ) -> Result<Vec<Division>, ApiError>;
    /// Distinct regions, sorted.
    async fn regions(&self) -> Result<Vec<String>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Division>, ApiError>;
    async fn find_by_key(&self, key: &DivisionKey) -> Result<Option<Division>, ApiError>;
    async fn create(&self, division: &Division) -> Result<(), ApiError>;
    async fn update(&self, division: &Division) -> Result<(), ApiError>;
    /// Delete a division. Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, ApiError>;
}

/// Read access to the NBE nomenclature.
pub trait NbeRepository: Send + Sync {
    async fn list(&self, filter: &NbeFilter, page: PageRequest)
    -> Result<Vec<NbeLine>, ApiError>;
}

/// Append-only audit log.
pub trait AuditRepository: Send + Sync {
    async fn record(&self, action: &AuditAction) -> Result<(), ApiError>;
    /// Newest first.
    async fn list(
        &self,
        filter: &AuditFilter,
        page: PageRequest,
    ) -> Result<Vec<AuditAction>, ApiError>;
}
