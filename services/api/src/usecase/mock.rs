//! In-memory repositories for usecase unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use cgcs_domain::audit::AuditKind;
use cgcs_domain::budget::BudgetStatus;
use cgcs_domain::division::DivisionKey;
use cgcs_domain::pagination::PageRequest;
use cgcs_domain::user::{UserRole, UserStatus};

use crate::domain::repository::{
    AuditRepository, BudgetRepository, CentreRepository, DivisionRepository, NbeRepository,
    RegisseurRepository, UserRepository,
};
use crate::domain::types::{
    AuditAction, AuditFilter, Budget, BudgetFilter, BudgetScope, Centre, CentreFilter,
    ChefCentreFilter, Correspondance, Division, DivisionFilter, LigneBudgetaire, LigneDetail,
    NbeFilter, NbeLine, Regisseur, RegisseurFilter, SourceRecette, User,
};
use crate::error::ApiError;
use crate::password::hash_password;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    regisseurs: Vec<Regisseur>,
    centres: Vec<Centre>,
    budgets: Vec<Budget>,
    lignes: Vec<LigneBudgetaire>,
    correspondances: Vec<Correspondance>,
    sources: Vec<SourceRecette>,
    divisions: Vec<Division>,
    nbe: Vec<NbeLine>,
    audit: Vec<AuditAction>,
}

/// Shared handle; clones see the same tables.
#[derive(Clone, Default)]
pub struct Memory(Arc<Mutex<Tables>>);

fn page_of<T>(items: Vec<T>, page: PageRequest) -> Vec<T> {
    items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .collect()
}

fn matches_search(term: &Option<String>, fields: &[&str]) -> bool {
    match term.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        None => true,
        Some(term) => {
            let term = term.to_lowercase();
            fields.iter().any(|f| f.to_lowercase().contains(&term))
        }
    }
}

impl Memory {
    pub fn insert_user(&self, user: User) {
        self.0.lock().unwrap().users.push(user);
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.0.lock().unwrap().users.iter().find(|u| u.id == id).cloned()
    }

    pub fn insert_regisseur(&self, regisseur: Regisseur) {
        self.0.lock().unwrap().regisseurs.push(regisseur);
    }

    pub fn regisseur(&self, id: Uuid) -> Option<Regisseur> {
        let tables = self.0.lock().unwrap();
        tables.regisseurs.iter().find(|r| r.id == id).cloned()
    }

    pub fn insert_centre(&self, centre: Centre) {
        self.0.lock().unwrap().centres.push(centre);
    }

    pub fn centre(&self, id: Uuid) -> Option<Centre> {
        let tables = self.0.lock().unwrap();
        tables.centres.iter().find(|c| c.id == id).cloned()
    }

    pub fn insert_budget(&self, budget: Budget) {
        self.0.lock().unwrap().budgets.push(budget);
    }

    pub fn budget(&self, id: Uuid) -> Option<Budget> {
        let tables = self.0.lock().unwrap();
        tables.budgets.iter().find(|b| b.id == id).cloned()
    }

    pub fn insert_nbe_line(&self, line: NbeLine) {
        self.0.lock().unwrap().nbe.push(line);
    }

    /// Recorded audit kinds in insertion order.
    pub fn audit_kinds(&self) -> Vec<AuditKind> {
        self.0.lock().unwrap().audit.iter().map(|a| a.action).collect()
    }
}

impl Tables {
    fn in_scope(&self, budget: &Budget, scope: BudgetScope) -> bool {
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

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_user(email: &str, password: &str, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: Uuid::now_v7(),
        email: email.to_owned(),
        password_hash: hash_password(password).unwrap(),
        nom: "Traoré".into(),
        prenom: "Moussa".into(),
        role,
        status: UserStatus::Active,
        code: None,
        telephone: None,
        centre_id: None,
        regisseur_id: None,
        must_change_password: true,
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
        nom: "Kouadio".into(),
        prenom: "Jean".into(),
        email: None,
        telephone: None,
        region: "Gbêkê".into(),
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
        nom: format!("Centre {code}"),
        adresse: None,
        ville: Some("Bouaké".into()),
        commune: None,
        departement: None,
        region: "Gbêkê".into(),
        type_centre: "CSU".into(),
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
        type_budget: "FONCTIONNEMENT".into(),
        statut: BudgetStatus::Brouillon,
        montant_total: 1000.0,
        montant_valide: 0.0,
        montant_restant: 1000.0,
        description: None,
        centre_id,
        cree_par,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_nbe_line(
    ordre: i32,
    ligne: Option<&str>,
    libelle: &str,
    categorie: Option<&str>,
) -> NbeLine {
    NbeLine {
        id: Uuid::now_v7(),
        ligne: ligne.map(str::to_owned),
        libelle: libelle.to_owned(),
        objet_depense: None,
        categorie: categorie.map(str::to_owned),
        sous_categorie: None,
        is_header: ligne.is_none(),
        is_highlighted: false,
        ordre,
    }
}

// ── Users ────────────────────────────────────────────────────────────────────

impl UserRepository for Memory {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self.user(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(ApiError::EmailAlreadyExists);
        }
        tables.users.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        let slot = tables
            .users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(ApiError::UserNotFound)?;
        *slot = User {
            password_hash: slot.password_hash.clone(),
            last_login_at: slot.last_login_at,
            ..user.clone()
        };
        Ok(())
    }

    async fn set_password(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(ApiError::UserNotFound)?;
        user.password_hash = password_hash.to_owned();
        user.must_change_password = false;
        Ok(())
    }

    async fn touch_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            user.last_login_at = Some(at);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.users.len();
        tables.users.retain(|u| u.id != id);
        Ok(tables.users.len() != before)
    }

    async fn list_chefs(
        &self,
        filter: &ChefCentreFilter,
        page: PageRequest,
    ) -> Result<Vec<User>, ApiError> {
        let tables = self.0.lock().unwrap();
        let items = tables
            .users
            .iter()
            .filter(|u| u.role == UserRole::ChefCentre)
            .filter(|u| filter.centre_id.is_none() || u.centre_id == filter.centre_id)
            .filter(|u| filter.regisseur_id.is_none() || u.regisseur_id == filter.regisseur_id)
            .filter(|u| matches_search(&filter.search, &[&u.nom, &u.prenom, &u.email]))
            .cloned()
            .collect();
        Ok(page_of(items, page))
    }

    async fn find_chef_of_centre(&self, centre_id: Uuid) -> Result<Option<User>, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.role == UserRole::ChefCentre && u.centre_id == Some(centre_id))
            .cloned())
    }

    async fn follow_centre_regisseur(
        &self,
        centre_id: Uuid,
        regisseur_id: Uuid,
    ) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        for user in tables.users.iter_mut().filter(|u| u.centre_id == Some(centre_id)) {
            user.regisseur_id = Some(regisseur_id);
        }
        Ok(())
    }

    async fn has_created_budgets(&self, id: Uuid) -> Result<bool, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.budgets.iter().any(|b| b.cree_par == id))
    }
}

// ── Régisseurs ───────────────────────────────────────────────────────────────

impl RegisseurRepository for Memory {
    async fn list(
        &self,
        filter: &RegisseurFilter,
        page: PageRequest,
    ) -> Result<Vec<Regisseur>, ApiError> {
        let tables = self.0.lock().unwrap();
        let items = tables
            .regisseurs
            .iter()
            .filter(|r| filter.region.as_ref().is_none_or(|region| &r.region == region))
            .filter(|r| filter.active.is_none_or(|active| r.active == active))
            .filter(|r| matches_search(&filter.search, &[&r.code, &r.nom, &r.prenom]))
            .cloned()
            .collect();
        Ok(page_of(items, page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Regisseur>, ApiError> {
        Ok(self.regisseur(id))
    }

    async fn create(&self, regisseur: &Regisseur) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        if tables.regisseurs.iter().any(|r| r.code == regisseur.code) {
            return Err(ApiError::CodeAlreadyExists);
        }
        tables.regisseurs.push(regisseur.clone());
        Ok(())
    }

    async fn update(&self, regisseur: &Regisseur) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        let slot = tables
            .regisseurs
            .iter_mut()
            .find(|r| r.id == regisseur.id)
            .ok_or(ApiError::RegisseurNotFound)?;
        *slot = regisseur.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.regisseurs.len();
        tables.regisseurs.retain(|r| r.id != id);
        Ok(tables.regisseurs.len() != before)
    }

    async fn count_centres(&self, id: Uuid) -> Result<u64, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .centres
            .iter()
            .filter(|c| c.regisseur_id == Some(id))
            .count() as u64)
    }

    async fn is_referenced(&self, id: Uuid) -> Result<bool, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.centres.iter().any(|c| c.regisseur_id == Some(id))
            || tables.users.iter().any(|u| u.regisseur_id == Some(id)))
    }
}

// ── Centres ──────────────────────────────────────────────────────────────────

impl CentreRepository for Memory {
    async fn list(&self, filter: &CentreFilter, page: PageRequest) -> Result<Vec<Centre>, ApiError> {
        let tables = self.0.lock().unwrap();
        let items = tables
            .centres
            .iter()
            .filter(|c| filter.region.as_ref().is_none_or(|region| &c.region == region))
            .filter(|c| filter.regisseur_id.is_none() || c.regisseur_id == filter.regisseur_id)
            .filter(|c| filter.active.is_none_or(|active| c.active == active))
            .filter(|c| {
                matches_search(
                    &filter.search,
                    &[&c.code, &c.nom, c.ville.as_deref().unwrap_or_default()],
                )
            })
            .cloned()
            .collect();
        Ok(page_of(items, page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Centre>, ApiError> {
        Ok(self.centre(id))
    }

    async fn create(&self, centre: &Centre) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        if tables.centres.iter().any(|c| c.code == centre.code) {
            return Err(ApiError::CodeAlreadyExists);
        }
        tables.centres.push(centre.clone());
        Ok(())
    }

    async fn update(&self, centre: &Centre) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        let slot = tables
            .centres
            .iter_mut()
            .find(|c| c.id == centre.id)
            .ok_or(ApiError::CentreNotFound)?;
        *slot = centre.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.centres.len();
        tables.centres.retain(|c| c.id != id);
        Ok(tables.centres.len() != before)
    }

    async fn is_referenced(&self, id: Uuid) -> Result<bool, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.users.iter().any(|u| u.centre_id == Some(id))
            || tables.budgets.iter().any(|b| b.centre_id == id))
    }
}

// ── Budgets ──────────────────────────────────────────────────────────────────

impl BudgetRepository for Memory {
    async fn list(
        &self,
        scope: BudgetScope,
        filter: &BudgetFilter,
        page: PageRequest,
    ) -> Result<Vec<Budget>, ApiError> {
        let tables = self.0.lock().unwrap();
        let items = tables
            .budgets
            .iter()
            .filter(|b| tables.in_scope(b, scope))
            .filter(|b| filter.annee.is_none_or(|annee| b.annee == annee))
            .filter(|b| filter.centre_id.is_none_or(|centre_id| b.centre_id == centre_id))
            .filter(|b| filter.statut.is_none_or(|statut| b.statut == statut))
            .cloned()
            .collect();
        Ok(page_of(items, page))
    }

    async fn find_by_id(&self, id: Uuid, scope: BudgetScope) -> Result<Option<Budget>, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .budgets
            .iter()
            .find(|b| b.id == id && tables.in_scope(b, scope))
            .cloned())
    }

    async fn create(&self, budget: &Budget) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        if tables.budgets.iter().any(|b| b.code == budget.code) {
            return Err(ApiError::CodeAlreadyExists);
        }
        tables.budgets.push(budget.clone());
        Ok(())
    }

    async fn update(&self, budget: &Budget) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        let slot = tables
            .budgets
            .iter_mut()
            .find(|b| b.id == budget.id)
            .ok_or(ApiError::BudgetNotFound)?;
        *slot = budget.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.budgets.len();
        tables.budgets.retain(|b| b.id != id);
        let ligne_ids: Vec<Uuid> = tables
            .lignes
            .iter()
            .filter(|l| l.budget_id == id)
            .map(|l| l.id)
            .collect();
        tables
            .correspondances
            .retain(|c| !ligne_ids.contains(&c.ligne_budgetaire_id));
        tables.lignes.retain(|l| l.budget_id != id);
        tables.sources.retain(|s| s.budget_id != id);
        Ok(tables.budgets.len() != before)
    }

    async fn lignes(&self, budget_id: Uuid) -> Result<Vec<LigneDetail>, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .lignes
            .iter()
            .filter(|l| l.budget_id == budget_id)
            .map(|l| LigneDetail {
                ligne: l.clone(),
                correspondances: tables
                    .correspondances
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
        let tables = self.0.lock().unwrap();
        Ok(tables
            .lignes
            .iter()
            .find(|l| l.id == ligne_id && l.budget_id == budget_id)
            .cloned())
    }

    async fn create_ligne(&self, ligne: &LigneBudgetaire) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        if tables
            .lignes
            .iter()
            .any(|l| l.budget_id == ligne.budget_id && l.code == ligne.code)
        {
            return Err(ApiError::CodeAlreadyExists);
        }
        tables.lignes.push(ligne.clone());
        Ok(())
    }

    async fn update_ligne(&self, ligne: &LigneBudgetaire) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        let slot = tables
            .lignes
            .iter_mut()
            .find(|l| l.id == ligne.id)
            .ok_or(ApiError::LigneBudgetaireNotFound)?;
        *slot = ligne.clone();
        Ok(())
    }

    async fn delete_ligne(&self, budget_id: Uuid, ligne_id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.lignes.len();
        tables
            .lignes
            .retain(|l| !(l.id == ligne_id && l.budget_id == budget_id));
        let deleted = tables.lignes.len() != before;
        if deleted {
            tables
                .correspondances
                .retain(|c| c.ligne_budgetaire_id != ligne_id);
        }
        Ok(deleted)
    }

    async fn find_correspondance(
        &self,
        ligne_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Correspondance>, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .correspondances
            .iter()
            .find(|c| c.id == id && c.ligne_budgetaire_id == ligne_id)
            .cloned())
    }

    async fn create_correspondance(&self, correspondance: &Correspondance) -> Result<(), ApiError> {
        self.0
            .lock()
            .unwrap()
            .correspondances
            .push(correspondance.clone());
        Ok(())
    }

    async fn update_correspondance(&self, correspondance: &Correspondance) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        let slot = tables
            .correspondances
            .iter_mut()
            .find(|c| c.id == correspondance.id)
            .ok_or(ApiError::CorrespondanceNotFound)?;
        *slot = correspondance.clone();
        Ok(())
    }

    async fn delete_correspondance(&self, ligne_id: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.correspondances.len();
        tables
            .correspondances
            .retain(|c| !(c.id == id && c.ligne_budgetaire_id == ligne_id));
        Ok(tables.correspondances.len() != before)
    }

    async fn sources(&self, budget_id: Uuid) -> Result<Vec<SourceRecette>, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .sources
            .iter()
            .filter(|s| s.budget_id == budget_id)
            .cloned()
            .collect())
    }

    async fn create_source(&self, source: &SourceRecette) -> Result<(), ApiError> {
        self.0.lock().unwrap().sources.push(source.clone());
        Ok(())
    }

    async fn delete_source(&self, budget_id: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.sources.len();
        tables
            .sources
            .retain(|s| !(s.id == id && s.budget_id == budget_id));
        Ok(tables.sources.len() != before)
    }
}

// ── Divisions ────────────────────────────────────────────────────────────────

impl DivisionRepository for Memory {
    async fn list(
        &self,
        filter: &DivisionFilter,
        page: PageRequest,
    ) -> Result<Vec<Division>, ApiError> {
        let tables = self.0.lock().unwrap();
        let items = tables
            .divisions
            .iter()
            .filter(|d| filter.region.as_ref().is_none_or(|v| &d.region == v))
            .filter(|d| filter.departement.as_ref().is_none_or(|v| &d.departement == v))
            .filter(|d| {
                filter
                    .sous_prefecture
                    .as_ref()
                    .is_none_or(|v| &d.sous_prefecture == v)
            })
            .filter(|d| filter.active.is_none_or(|active| d.active == active))
            .filter(|d| matches_search(&filter.search, &[&d.commune, &d.chef_lieu]))
            .cloned()
            .collect();
        Ok(page_of(items, page))
    }

    async fn regions(&self) -> Result<Vec<String>, ApiError> {
        let tables = self.0.lock().unwrap();
        let mut regions: Vec<String> = tables.divisions.iter().map(|d| d.region.clone()).collect();
        regions.sort();
        regions.dedup();
        Ok(regions)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Division>, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables.divisions.iter().find(|d| d.id == id).cloned())
    }

    async fn find_by_key(&self, key: &DivisionKey) -> Result<Option<Division>, ApiError> {
        let tables = self.0.lock().unwrap();
        Ok(tables
            .divisions
            .iter()
            .find(|d| {
                &DivisionKey::new(
                    &d.region,
                    &d.departement,
                    &d.chef_lieu,
                    &d.sous_prefecture,
                    &d.commune,
                ) == key
            })
            .cloned())
    }

    async fn create(&self, division: &Division) -> Result<(), ApiError> {
        self.0.lock().unwrap().divisions.push(division.clone());
        Ok(())
    }

    async fn update(&self, division: &Division) -> Result<(), ApiError> {
        let mut tables = self.0.lock().unwrap();
        let slot = tables
            .divisions
            .iter_mut()
            .find(|d| d.id == division.id)
            .ok_or(ApiError::DivisionNotFound)?;
        *slot = division.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        let mut tables = self.0.lock().unwrap();
        let before = tables.divisions.len();
        tables.divisions.retain(|d| d.id != id);
        Ok(tables.divisions.len() != before)
    }
}

// ── NBE / audit ──────────────────────────────────────────────────────────────

impl NbeRepository for Memory {
    async fn list(&self, filter: &NbeFilter, page: PageRequest) -> Result<Vec<NbeLine>, ApiError> {
        let tables = self.0.lock().unwrap();
        let mut items: Vec<NbeLine> = tables
            .nbe
            .iter()
            .filter(|l| filter.categorie.is_none() || l.categorie == filter.categorie)
            .filter(|l| {
                matches_search(
                    &filter.search,
                    &[l.ligne.as_deref().unwrap_or_default(), &l.libelle],
                )
            })
            .cloned()
            .collect();
        items.sort_by_key(|l| l.ordre);
        Ok(page_of(items, page))
    }
}

impl AuditRepository for Memory {
    async fn record(&self, action: &AuditAction) -> Result<(), ApiError> {
        self.0.lock().unwrap().audit.push(action.clone());
        Ok(())
    }

    async fn list(
        &self,
        filter: &AuditFilter,
        page: PageRequest,
    ) -> Result<Vec<AuditAction>, ApiError> {
        let tables = self.0.lock().unwrap();
        let mut items: Vec<AuditAction> = tables
            .audit
            .iter()
            .filter(|a| filter.entity.as_ref().is_none_or(|e| &a.entity == e))
            .filter(|a| filter.user_id.is_none() || a.user_id == filter.user_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(page_of(items, page))
    }
}
