use chrono::{DateTime, Utc};
use uuid::Uuid;

use cgcs_domain::audit::AuditKind;
use cgcs_domain::budget::BudgetStatus;
use cgcs_domain::user::{UserRole, UserStatus};

// ── Organisation ─────────────────────────────────────────────────────────────

/// Regional treasurer supervising a set of centres.
#[derive(Debug, Clone)]
pub struct Regisseur {
    pub id: Uuid,
    pub code: String,
    pub nom: String,
    pub prenom: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub region: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct RegisseurFilter {
    pub search: Option<String>,
    pub region: Option<String>,
    pub active: Option<bool>,
}

/// A health centre.
#[derive(Debug, Clone)]
pub struct Centre {
    pub id: Uuid,
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
    pub active: bool,
    pub regisseur_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct CentreFilter {
    pub search: Option<String>,
    pub region: Option<String>,
    pub regisseur_id: Option<Uuid>,
    pub active: Option<bool>,
}

/// Login account. Chefs de centre are users with role `CHEF_CENTRE`.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub nom: String,
    pub prenom: String,
    pub role: UserRole,
    pub status: UserStatus,
    pub code: Option<String>,
    pub telephone: Option<String>,
    pub centre_id: Option<Uuid>,
    pub regisseur_id: Option<Uuid>,
    pub must_change_password: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ChefCentreFilter {
    pub search: Option<String>,
    pub centre_id: Option<Uuid>,
    pub regisseur_id: Option<Uuid>,
}

/// Emails are compared and stored lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

// ── Budgets ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Budget {
    pub id: Uuid,
    pub code: String,
    pub nom: String,
    pub annee: i32,
    pub type_budget: String,
    pub statut: BudgetStatus,
    pub montant_total: f64,
    pub montant_valide: f64,
    pub montant_restant: f64,
    pub description: Option<String>,
    pub centre_id: Uuid,
    pub cree_par: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Recompute `montant_restant` from the total and the validated amount.
    pub fn refresh_restant(&mut self) {
        self.montant_restant = self.montant_total - self.montant_valide;
    }
}

#[derive(Debug, Clone, Default)]
pub struct BudgetFilter {
    pub annee: Option<i32>,
    pub centre_id: Option<Uuid>,
    pub statut: Option<BudgetStatus>,
}

/// Budgets a caller may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetScope {
    All,
    /// Budgets of centres supervised by this régisseur.
    Regisseur(Uuid),
    /// Budgets of this centre.
    Centre(Uuid),
}

impl BudgetScope {
    /// `None` when a régisseur or chef account is not attached to anything.
    pub fn for_caller(
        role: UserRole,
        centre_id: Option<Uuid>,
        regisseur_id: Option<Uuid>,
    ) -> Option<Self> {
        match role {
            UserRole::Admin => Some(Self::All),
            UserRole::Regisseur => regisseur_id.map(Self::Regisseur),
            UserRole::ChefCentre => centre_id.map(Self::Centre),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LigneBudgetaire {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub code: String,
    pub libelle: String,
    pub montant_prevu: f64,
    pub chapitre: Option<String>,
    pub section: Option<String>,
    pub paragraphe: Option<String>,
    pub article: Option<String>,
    pub nbe_ligne: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Activity mapped onto a budget line.
#[derive(Debug, Clone)]
pub struct Correspondance {
    pub id: Uuid,
    pub ligne_budgetaire_id: Uuid,
    pub code_activite: String,
    pub nom_activite: String,
    pub categorie: String,
    pub sous_categorie: Option<String>,
    pub pourcentage: f64,
    pub montant_max: Option<f64>,
    pub priorite: i32,
    pub valide: bool,
    pub valide_par: Option<Uuid>,
    pub valide_le: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct SourceRecette {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub libelle: String,
    pub nature: Option<String>,
    pub montant: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LigneDetail {
    pub ligne: LigneBudgetaire,
    pub correspondances: Vec<Correspondance>,
}

/// A budget with its lines (each with its correspondances) and revenue sources.
#[derive(Debug, Clone)]
pub struct BudgetDetail {
    pub budget: Budget,
    pub lignes: Vec<LigneDetail>,
    pub sources: Vec<SourceRecette>,
}

// ── Reference data ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Division {
    pub id: Uuid,
    pub region: String,
    pub departement: String,
    pub chef_lieu: String,
    pub sous_prefecture: String,
    pub commune: String,
    pub code: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct DivisionFilter {
    pub region: Option<String>,
    pub departement: Option<String>,
    pub sous_prefecture: Option<String>,
    pub search: Option<String>,
    pub active: Option<bool>,
}

/// Row of the NBE expense nomenclature.
#[derive(Debug, Clone)]
pub struct NbeLine {
    pub id: Uuid,
    pub ligne: Option<String>,
    pub libelle: String,
    pub objet_depense: Option<String>,
    pub categorie: Option<String>,
    pub sous_categorie: Option<String>,
    pub is_header: bool,
    pub is_highlighted: bool,
    pub ordre: i32,
}

#[derive(Debug, Clone, Default)]
pub struct NbeFilter {
    pub categorie: Option<String>,
    pub search: Option<String>,
}

// ── Audit ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct AuditAction {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: AuditKind,
    pub entity: String,
    pub entity_id: Option<Uuid>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditAction {
    pub fn new(user_id: Uuid, action: AuditKind, entity: &str, entity_id: Uuid) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: Some(user_id),
            action,
            entity: entity.to_owned(),
            entity_id: Some(entity_id),
            description: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuditFilter {
    pub entity: Option<String>,
    pub user_id: Option<Uuid>,
}
