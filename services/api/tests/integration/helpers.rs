use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use cgcs_api::domain::repository::{
    AuditRepository, BudgetRepository, CentreRepository, RegisseurRepository, UserRepository,
};
use cgcs_api::domain::types::{
    AuditAction, AuditFilter, Budget, BudgetFilter, BudgetScope, Centre, CentreFilter,
    ChefCentreFilter, Correspondance, LigneBudgetaire, LigneDetail, Regisseur, RegisseurFilter,
    SourceRecette, User,
};
use cgcs_api::error::ApiError;
use cgcs_api::password::hash_password;
use cgcs_domain::audit::AuditKind;
use cgcs_domain::budget::BudgetStatus;
use cgcs_domain::pagination::PageRequest;
use cgcs_domain::user::{UserRole, UserStatus};

pub use cgcs_testing::auth::TEST_JWT_SECRET;

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(email: &str, password: &str, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        password_hash: hash_password(password).unwrap(),
        nom: "Koné".to_owned(),
        prenom: "Awa".to_owned(),
        role,
        status: UserStatus::Active,
        code: None,
        telephone: None,
        centre_id: None,
        regisseur_id: None,
        must_change_password: false,
        last_login_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_regisseur(code: &str) -> Regisseur {
    let now = Utc::now();
    Regisseur {
        id: Uuid::now_v7(),
        code: code.to_owned(),
        nom: "Yao".to_owned(),
        prenom: "Paul".to_owned(),
        email: None,
        telephone: None,
        region: "Poro".to_owned(),
        active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_centre(code: &str, regisseur_id: Option<Uuid>) -> Centre {
    let now = Utc::now();
    Centre {
        id: Uuid::now_v7(),
        code: code.to_owned(),
        nom: format!("CSU {code}"),
        adresse: None,
        ville: Some("Korhogo".to_owned()),
        commune: None,
        departement: None,
        region: "Poro".to_owned(),
        type_centre: "CSU".to_owned(),
        niveau: None,
        telephone: None,
        active: true,
        regisseur_id,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_budget(code: &str, centre_id: Uuid, cree_par: Uuid) -> Budget {
    let now = Utc::now();
    Budget {
        id: Uuid::now_v7(),
        code: code.to_owned(),
        nom: format!("Budget {code}"),
        annee: 2025,
        type_budget: "FONCTIONNEMENT".to_owned(),
        statut: BudgetStatus::Brouillon,
        montant_total: 500_000.0,
        montant_valide: 0.0,
        montant_restant: 500_000.0,
        description: None,
        centre_id,
        cree_par,
        created_at: now,
        updated_at: now,
    }
}

fn paged<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    /// Users recorded as budget creators.
    pub budget_creators: Vec<Uuid>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
            budget_creators: vec![],
        }
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.get(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(ApiError::EmailAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(existing) = users.iter_mut().find(|u| u.id == user.id) {
            *existing = User {
                password_hash: existing.password_hash.clone(),
                last_login_at: existing.last_login_at,
                ..user.clone()
            };
        }
        Ok(())
    }

    async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.password_hash = password_hash.to_owned();
            user.must_change_password = false;
        }
        Ok(())
    }

    async fn touch_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() != before)
    }

    async fn list_chefs(
        &self,
        filter: &ChefCentreFilter,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiError> {
        let chefs = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| u.role == UserRole::ChefCentre)
            .filter(|u| filter.centre_id.is_none() || u.centre_id == filter.centre_id)
            .filter(|u| filter.regisseur_id.is_none() || u.regisseur_id == filter.regisseur_id)
            .cloned()
            .collect();
        Ok(paged(chefs, page))
    }

    async fn find_chef_of_centre(&self, centre_id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.role == UserRole::ChefCentre && u.centre_id == Some(centre_id))
            .cloned())
    }

    async fn follow_centre_regisseur(
        &self,
        centre_id: Uuid,
        regisseur_id: Uuid,
    ) -> Result<(), ApiError> {
        let mut users = self.users.lock().unwrap();
        for user in users.iter_mut().filter(|u| u.centre_id == Some(centre_id)) {
            user.regisseur_id = Some(regisseur_id);
        }
        Ok(())
    }

    async fn has_created_budgets(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.budget_creators.contains(&id))
    }
}

// ── MockCentreRepo ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockCentreRepo {
    pub centres: Arc<Mutex<Vec<Centre>>>,
    /// Centres still referenced by a user or a budget.
    pub referenced: Vec<Uuid>,
}

impl MockCentreRepo {
    pub fn new(centres: Vec<Centre>) -> Self {
        Self {
            centres: Arc::new(Mutex::new(centres)),
            referenced: vec![],
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl CentreRepository for MockCentreRepo {
    async fn list(&self, filter: &CentreFilter, page: PageRequest) -> Result<Vec<Centre>, ApiError> {
        let centres = self
            .centres
            .lock()
            .unwrap()
            .iter()
            .filter(|c| filter.regisseur_id.is_none() || c.regisseur_id == filter.regisseur_id)
            .cloned()
            .collect();
        Ok(paged(centres, page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Centre>, ApiError> {
        Ok(self
            .centres
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(&self, centre: &Centre) -> Result<(), ApiError> {
        let mut centres = self.centres.lock().unwrap();
        if centres.iter().any(|c| c.code == centre.code) {
            return Err(ApiError::CodeAlreadyExists);
        }
        centres.push(centre.clone());
        Ok(())
    }

    async fn update(&self, centre: &Centre) -> Result<(), ApiError> {
        let mut centres = self.centres.lock().unwrap();
        if let Some(existing) = centres.iter_mut().find(|c| c.id == centre.id) {
            *existing = centre.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut centres = self.centres.lock().unwrap();
        let before = centres.len();
        centres.retain(|c| c.id != id);
        Ok(centres.len() != before)
    }

    async fn is_referenced(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.referenced.contains(&id))
    }
}

// ── MockRegisseurRepo ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockRegisseurRepo {
    pub regisseurs: Arc<Mutex<Vec<Regisseur>>>,
    /// Number of centres supervised, per régisseur.
    pub centre_counts: Vec<(Uuid, u64)>,
}

impl MockRegisseurRepo {
    pub fn new(regisseurs: Vec<Regisseur>) -> Self {
        Self {
            regisseurs: Arc::new(Mutex::new(regisseurs)),
            centre_counts: vec![],
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl RegisseurRepository for MockRegisseurRepo {
    async fn list(
        &self,
        _filter: &RegisseurFilter,
        page: PageRequest,
    ) -> Result<Vec<Regisseur>, ApiError> {
        Ok(paged(self.regisseurs.lock().unwrap().clone(), page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Regisseur>, ApiError> {
        Ok(self
            .regisseurs
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn create(&self, regisseur: &Regisseur) -> Result<(), ApiError> {
        let mut regisseurs = self.regisseurs.lock().unwrap();
        if regisseurs.iter().any(|r| r.code == regisseur.code) {
            return Err(ApiError::CodeAlreadyExists);
        }
        regisseurs.push(regisseur.clone());
        Ok(())
    }

    async fn update(&self, regisseur: &Regisseur) -> Result<(), ApiError> {
        let mut regisseurs = self.regisseurs.lock().unwrap();
        if let Some(existing) = regisseurs.iter_mut().find(|r| r.id == regisseur.id) {
            *existing = regisseur.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut regisseurs = self.regisseurs.lock().unwrap();
        let before = regisseurs.len();
        regisseurs.retain(|r| r.id != id);
        Ok(regisseurs.len() != before)
    }

    async fn count_centres(&self, id: Uuid) -> Result<u64, ApiError> {
        Ok(self
            .centre_counts
            .iter()
            .find(|(regisseur_id, _)| *regisseur_id == id)
            .map(|(_, count)| *count)
            .unwrap_or(0))
    }

    async fn is_referenced(&self, id: Uuid) -> Result<bool, ApiError> {
        Ok(self.count_centres(id).await? > 0)
    }
}

// ── MockBudgetRepo ───────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockBudgetRepo {
    pub budgets: Arc<Mutex<Vec<Budget>>>,
    /// Centres used to resolve the régisseur scope.
    pub centres: Vec<Centre>,
    pub lignes: Arc<Mutex<Vec<LigneBudgetaire>>>,
    pub correspondances: Arc<Mutex<Vec<Correspondance>>>,
    pub sources: Arc<Mutex<Vec<SourceRecette>>>,
}

impl MockBudgetRepo {
    pub fn new(budgets: Vec<Budget>, centres: Vec<Centre>) -> Self {
        Self {
            budgets: Arc::new(Mutex::new(budgets)),
            centres,
            ..Default::default()
        }
    }

    fn visible(&self, budget: &Budget, scope: BudgetScope) -> bool {
        match scope {
            BudgetScope::All => true,
            BudgetScope::Centre(centre_id) => budget.centre_id == centre_id,
            BudgetScope::Regisseur(regisseur_id) => self
                .centres
                .iter()
                .any(|c| c.id == budget.centre_id && c.regisseur_id == Some(regisseur_id)),
        }
    }
}

impl BudgetRepository for MockBudgetRepo {
    async fn list(
        &self,
        scope: BudgetScope,
        filter: &BudgetFilter,
        page: PageRequest,
    ) -> Result<Vec<Budget>, ApiError> {
        let budgets = self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .filter(|b| self.visible(b, scope))
            .filter(|b| filter.annee.is_none_or(|annee| b.annee == annee))
            .filter(|b| filter.statut.is_none_or(|statut| b.statut == statut))
            .cloned()
            .collect();
        Ok(paged(budgets, page))
    }

    async fn find_by_id(&self, id: Uuid, scope: BudgetScope) -> Result<Option<Budget>, ApiError> {
        Ok(self
            .budgets
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.id == id && self.visible(b, scope))
            .cloned())
    }

    async fn create(&self, budget: &Budget) -> Result<(), ApiError> {
        let mut budgets = self.budgets.lock().unwrap();
        if budgets.iter().any(|b| b.code == budget.code) {
            return Err(ApiError::CodeAlreadyExists);
        }
        budgets.push(budget.clone());
        Ok(())
    }

    async fn update(&self, budget: &Budget) -> Result<(), ApiError> {
        let mut budgets = self.budgets.lock().unwrap();
        if let Some(existing) = budgets.iter_mut().find(|b| b.id == budget.id) {
            *existing = budget.clone();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut budgets = self.budgets.lock().unwrap();
        let before = budgets.len();
        budgets.retain(|b| b.id != id);
        self.lignes.lock().unwrap().retain(|l| l.budget_id != id);
        self.sources.lock().unwrap().retain(|s| s.budget_id != id);
        Ok(budgets.len() != before)
    }

    async fn lignes(&self, budget_id: Uuid) -> Result<Vec<LigneDetail>, ApiError> {
        let correspondances = self.correspondances.lock().unwrap();
        Ok(self
            .lignes
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.budget_id == budget_id)
            .map(|l| LigneDetail {
                ligne: l.clone(),
                correspondances: correspondances
                    .iter()
                    .filter(|c| c.ligne_budgetaire_id == l.id)
                    .cloned()
                    .collect(),
            })
            .collect())
    }

    async fn find_ligne(
        &self,
        budget_id: Uuid,
        ligne_id: Uuid,
    ) -> Result<Option<LigneBudgetaire>, ApiError> {
        Ok(self
            .lignes
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == ligne_id && l.budget_id == budget_id)
            .cloned())
    }

    async fn create_ligne(&self, ligne: &LigneBudgetaire) -> Result<(), ApiError> {
        let mut lignes = self.lignes.lock().unwrap();
        if lignes
            .iter()
            .any(|l| l.budget_id == ligne.budget_id && l.code == ligne.code)
        {
            return Err(ApiError::CodeAlreadyExists);
        }
        lignes.push(ligne.clone());
        Ok(())
    }

    async fn update_ligne(&self, ligne: &LigneBudgetaire) -> Result<(), ApiError> {
        let mut lignes = self.lignes.lock().unwrap();
        if let Some(existing) = lignes.iter_mut().find(|l| l.id == ligne.id) {
            *existing = ligne.clone();
        }
        Ok(())
    }

    async fn delete_ligne(&self, budget_id: Uuid, ligne_id: Uuid) -> Result<bool, ApiError> {
        let mut lignes = self.lignes.lock().unwrap();
        let before = lignes.len();
        lignes.retain(|l| !(l.id == ligne_id && l.budget_id == budget_id));
        Ok(lignes.len() != before)
    }

    async fn find_correspondance(
        &self,
        ligne_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Correspondance>, ApiError> {
        Ok(self
            .correspondances
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id && c.ligne_budgetaire_id == ligne_id)
            .cloned())
    }

    async fn create_correspondance(&self, correspondance: &Correspondance) -> Result<(), ApiError> {
        self.correspondances
            .lock()
            .unwrap()
            .push(correspondance.clone());
        Ok(())
    }

    async fn update_correspondance(&self, correspondance: &Correspondance) -> Result<(), ApiError> {
        let mut correspondances = self.correspondances.lock().unwrap();
        if let Some(existing) = correspondances
            .iter_mut()
            .find(|c| c.id == correspondance.id)
        {
            *existing = correspondance.clone();
        }
        Ok(())
    }

    async fn delete_correspondance(&self, ligne_id: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let mut correspondances = self.correspondances.lock().unwrap();
        let before = correspondances.len();
        correspondances.retain(|c| !(c.id == id && c.ligne_budgetaire_id == ligne_id));
        Ok(correspondances.len() != before)
    }

    async fn sources(&self, budget_id: Uuid) -> Result<Vec<SourceRecette>, ApiError> {
        Ok(self
            .sources
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.budget_id == budget_id)
            .cloned()
            .collect())
    }

    async fn create_source(&self, source: &SourceRecette) -> Result<(), ApiError> {
        self.sources.lock().unwrap().push(source.clone());
        Ok(())
    }

    async fn delete_source(&self, budget_id: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let mut sources = self.sources.lock().unwrap();
        let before = sources.len();
        sources.retain(|s| !(s.id == id && s.budget_id == budget_id));
        Ok(sources.len() != before)
    }
}

// ── MockAuditRepo ────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockAuditRepo {
    pub actions: Arc<Mutex<Vec<AuditAction>>>,
}

impl MockAuditRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Recorded kinds, in insertion order.
    pub fn kinds(&self) -> Vec<AuditKind> {
        self.actions.lock().unwrap().iter().map(|a| a.action).collect()
    }
}

impl AuditRepository for MockAuditRepo {
    async fn record(&self, action: &AuditAction) -> Result<(), ApiError> {
        self.actions.lock().unwrap().push(action.clone());
        Ok(())
    }

    async fn list(
        &self,
        _filter: &AuditFilter,
        page: PageRequest,
    ) -> Result<Vec<AuditAction>, ApiError> {
        let mut actions = self.actions.lock().unwrap().clone();
        actions.reverse();
        Ok(paged(actions, page))
    }
}
