use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Select,
    sea_query::{Expr, Query},
};
use uuid::Uuid;

use cgcs_api_schema::{
    budgets, centres, correspondances_activites, lignes_budgetaires, sources_recettes,
};
use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::BudgetRepository;
use crate::domain::types::{
    Budget, BudgetFilter, BudgetScope, Correspondance, LigneBudgetaire, LigneDetail,
    SourceRecette,
};
use crate::error::ApiError;

use super::{code_conflict, write_error};

#[derive(Clone)]
pub struct DbBudgetRepository {
    pub db: DatabaseConnection,
}

/// Restrict a budget query to what `scope` may see.
fn scoped(query: Select<budgets::Entity>, scope: BudgetScope) -> Select<budgets::Entity> {
    match scope {
        BudgetScope::All => query,
        BudgetScope::Centre(centre_id) => query.filter(budgets::Column::CentreId.eq(centre_id)),
        BudgetScope::Regisseur(regisseur_id) => query.filter(
            budgets::Column::CentreId.in_subquery(
                Query::select()
                    .column(centres::Column::Id)
                    .from(centres::Entity)
                    .and_where(Expr::col(centres::Column::RegisseurId).eq(regisseur_id))
                    .to_owned(),
            ),
        ),
    }
}

impl BudgetRepository for DbBudgetRepository {
    async fn list(
        &self,
        scope: BudgetScope,
        filter: &BudgetFilter,
        page: PageRequest,
    ) -> Result<Vec<Budget>, ApiError> {
        let mut query = scoped(budgets::Entity::find(), scope);
        if let Some(annee) = filter.annee {
            query = query.filter(budgets::Column::Annee.eq(annee));
        }
        if let Some(centre_id) = filter.centre_id {
            query = query.filter(budgets::Column::CentreId.eq(centre_id));
        }
        if let Some(statut) = filter.statut {
            query = query.filter(budgets::Column::Statut.eq(statut.as_str()));
        }
        let models = query
            .order_by_desc(budgets::Column::Annee)
            .order_by_asc(budgets::Column::Code)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list budgets")?;
        models.into_iter().map(budget_from_model).collect()
    }

    async fn find_by_id(&self, id: Uuid, scope: BudgetScope) -> Result<Option<Budget>, ApiError> {
        let model = scoped(budgets::Entity::find_by_id(id), scope)
            .one(&self.db)
            .await
            .context("find budget by id")?;
        model.map(budget_from_model).transpose()
    }

    async fn create(&self, budget: &Budget) -> Result<(), ApiError> {
        budgets::ActiveModel {
            id: Set(budget.id),
            code: Set(budget.code.clone()),
            nom: Set(budget.nom.clone()),
            annee: Set(budget.annee),
            type_budget: Set(budget.type_budget.clone()),
            statut: Set(budget.statut.as_str().to_owned()),
            montant_total: Set(budget.montant_total),
            montant_valide: Set(budget.montant_valide),
            montant_restant: Set(budget.montant_restant),
            description: Set(budget.description.clone()),
            centre_id: Set(budget.centre_id),
            cree_par: Set(budget.cree_par),
            created_at: Set(budget.created_at),
            updated_at: Set(budget.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|err| write_error(err, "create budget", code_conflict))?;
        Ok(())
    }

    async fn update(&self, budget: &Budget) -> Result<(), ApiError> {
        budgets::ActiveModel {
            id: Set(budget.id),
            nom: Set(budget.nom.clone()),
            annee: Set(budget.annee),
            type_budget: Set(budget.type_budget.clone()),
            statut: Set(budget.statut.as_str().to_owned()),
            montant_total: Set(budget.montant_total),
            montant_valide: Set(budget.montant_valide),
            montant_restant: Set(budget.montant_restant),
            description: Set(budget.description.clone()),
            updated_at: Set(budget.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update budget")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ApiError> {
        // lignes, correspondances and sources go with it (ON DELETE CASCADE)
        let res = budgets::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete budget")?;
        Ok(res.rows_affected > 0)
    }

    async fn lignes(&self, budget_id: Uuid) -> Result<Vec<LigneDetail>, ApiError> {
        let lignes = lignes_budgetaires::Entity::find()
            .filter(lignes_budgetaires::Column::BudgetId.eq(budget_id))
            .order_by_asc(lignes_budgetaires::Column::Code)
            .all(&self.db)
            .await
            .context("list lignes of budget")?;
        if lignes.is_empty() {
            return Ok(Vec::new());
        }

        let ligne_ids: Vec<Uuid> = lignes.iter().map(|l| l.id).collect();
        let rows = correspondances_activites::Entity::find()
            .filter(correspondances_activites::Column::LigneBudgetaireId.is_in(ligne_ids))
            .order_by_asc(correspondances_activites::Column::Priorite)
            .order_by_asc(correspondances_activites::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list correspondances of budget")?;
        let mut by_ligne: HashMap<Uuid, Vec<Correspondance>> = HashMap::new();
        for row in rows {
            by_ligne
                .entry(row.ligne_budgetaire_id)
                .or_default()
                .push(correspondance_from_model(row));
        }

        Ok(lignes
            .into_iter()
            .map(|model| LigneDetail {
                correspondances: by_ligne.remove(&model.id).unwrap_or_default(),
                ligne: ligne_from_model(model),
            })
            .collect())
    }

    async fn find_ligne(
        &self,
        budget_id: Uuid,
        ligne_id: Uuid,
    ) -> Result<Option<LigneBudgetaire>, ApiError> {
        let model = lignes_budgetaires::Entity::find_by_id(ligne_id)
            .filter(lignes_budgetaires::Column::BudgetId.eq(budget_id))
            .one(&self.db)
            .await
            .context("find ligne budgetaire")?;
        Ok(model.map(ligne_from_model))
    }

    async fn create_ligne(&self, ligne: &LigneBudgetaire) -> Result<(), ApiError> {
        lignes_budgetaires::ActiveModel {
            id: Set(ligne.id),
            budget_id: Set(ligne.budget_id),
            code: Set(ligne.code.clone()),
            libelle: Set(ligne.libelle.clone()),
            montant_prevu: Set(ligne.montant_prevu),
            chapitre: Set(ligne.chapitre.clone()),
            section: Set(ligne.section.clone()),
            paragraphe: Set(ligne.paragraphe.clone()),
            article: Set(ligne.article.clone()),
            nbe_ligne: Set(ligne.nbe_ligne.clone()),
            created_at: Set(ligne.created_at),
            updated_at: Set(ligne.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|err| write_error(err, "create ligne budgetaire", code_conflict))?;
        Ok(())
    }

    async fn update_ligne(&self, ligne: &LigneBudgetaire) -> Result<(), ApiError> {
        lignes_budgetaires::ActiveModel {
            id: Set(ligne.id),
            code: Set(ligne.code.clone()),
            libelle: Set(ligne.libelle.clone()),
            montant_prevu: Set(ligne.montant_prevu),
            chapitre: Set(ligne.chapitre.clone()),
            section: Set(ligne.section.clone()),
            paragraphe: Set(ligne.paragraphe.clone()),
            article: Set(ligne.article.clone()),
            nbe_ligne: Set(ligne.nbe_ligne.clone()),
            updated_at: Set(ligne.updated_at),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(|err| write_error(err, "update ligne budgetaire", code_conflict))?;
        Ok(())
    }

    async fn delete_ligne(&self, budget_id: Uuid, ligne_id: Uuid) -> Result<bool, ApiError> {
        let res = lignes_budgetaires::Entity::delete_many()
            .filter(lignes_budgetaires::Column::Id.eq(ligne_id))
            .filter(lignes_budgetaires::Column::BudgetId.eq(budget_id))
            .exec(&self.db)
            .await
            .context("delete ligne budgetaire")?;
        Ok(res.rows_affected > 0)
    }

    async fn find_correspondance(
        &self,
        ligne_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Correspondance>, ApiError> {
        let model = correspondances_activites::Entity::find_by_id(id)
            .filter(correspondances_activites::Column::LigneBudgetaireId.eq(ligne_id))
            .one(&self.db)
            .await
            .context("find correspondance")?;
        Ok(model.map(correspondance_from_model))
    }

    async fn create_correspondance(&self, correspondance: &Correspondance) -> Result<(), ApiError> {
        correspondances_activites::ActiveModel {
            id: Set(correspondance.id),
            ligne_budgetaire_id: Set(correspondance.ligne_budgetaire_id),
            code_activite: Set(correspondance.code_activite.clone()),
            nom_activite: Set(correspondance.nom_activite.clone()),
            categorie: Set(correspondance.categorie.clone()),
            sous_categorie: Set(correspondance.sous_categorie.clone()),
            pourcentage: Set(correspondance.pourcentage),
            montant_max: Set(correspondance.montant_max),
            priorite: Set(correspondance.priorite),
            valide: Set(correspondance.valide),
            valide_par: Set(correspondance.valide_par),
            valide_le: Set(correspondance.valide_le),
            created_at: Set(correspondance.created_at),
        }
        .insert(&self.db)
        .await
        .context("create correspondance")?;
        Ok(())
    }

    async fn update_correspondance(&self, correspondance: &Correspondance) -> Result<(), ApiError> {
        correspondances_activites::ActiveModel {
            id: Set(correspondance.id),
            valide: Set(correspondance.valide),
            valide_par: Set(correspondance.valide_par),
            valide_le: Set(correspondance.valide_le),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update correspondance")?;
        Ok(())
    }

    async fn delete_correspondance(&self, ligne_id: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let res = correspondances_activites::Entity::delete_many()
            .filter(correspondances_activites::Column::Id.eq(id))
            .filter(correspondances_activites::Column::LigneBudgetaireId.eq(ligne_id))
            .exec(&self.db)
            .await
            .context("delete correspondance")?;
        Ok(res.rows_affected > 0)
    }

    async fn sources(&self, budget_id: Uuid) -> Result<Vec<SourceRecette>, ApiError> {
        let models = sources_recettes::Entity::find()
            .filter(sources_recettes::Column::BudgetId.eq(budget_id))
            .order_by_asc(sources_recettes::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list sources de recette")?;
        Ok(models.into_iter().map(source_from_model).collect())
    }

    async fn create_source(&self, source: &SourceRecette) -> Result<(), ApiError> {
        sources_recettes::ActiveModel {
            id: Set(source.id),
            budget_id: Set(source.budget_id),
            libelle: Set(source.libelle.clone()),
            nature: Set(source.nature.clone()),
            montant: Set(source.montant),
            created_at: Set(source.created_at),
        }
        .insert(&self.db)
        .await
        .context("create source de recette")?;
        Ok(())
    }

    async fn delete_source(&self, budget_id: Uuid, id: Uuid) -> Result<bool, ApiError> {
        let res = sources_recettes::Entity::delete_many()
            .filter(sources_recettes::Column::Id.eq(id))
            .filter(sources_recettes::Column::BudgetId.eq(budget_id))
            .exec(&self.db)
            .await
            .context("delete source de recette")?;
        Ok(res.rows_affected > 0)
    }
}

fn budget_from_model(model: budgets::Model) -> Result<Budget, ApiError> {
    Ok(Budget {
        id: model.id,
        statut: model.statut.parse().context("parse budget statut")?,
        code: model.code,
        nom: model.nom,
        annee: model.annee,
        type_budget: model.type_budget,
        montant_total: model.montant_total,
        montant_valide: model.montant_valide,
        montant_restant: model.montant_restant,
        description: model.description,
        centre_id: model.centre_id,
        cree_par: model.cree_par,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

fn ligne_from_model(model: lignes_budgetaires::Model) -> LigneBudgetaire {
    LigneBudgetaire {
        id: model.id,
        budget_id: model.budget_id,
        code: model.code,
        libelle: model.libelle,
        montant_prevu: model.montant_prevu,
        chapitre: model.chapitre,
        section: model.section,
        paragraphe: model.paragraphe,
        article: model.article,
        nbe_ligne: model.nbe_ligne,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn correspondance_from_model(model: correspondances_activites::Model) -> Correspondance {
    Correspondance {
        id: model.id,
        ligne_budgetaire_id: model.ligne_budgetaire_id,
        code_activite: model.code_activite,
        nom_activite: model.nom_activite,
        categorie: model.categorie,
        sous_categorie: model.sous_categorie,
        pourcentage: model.pourcentage,
        montant_max: model.montant_max,
        priorite: model.priorite,
        valide: model.valide,
        valide_par: model.valide_par,
        valide_le: model.valide_le,
        created_at: model.created_at,
    }
}

fn source_from_model(model: sources_recettes::Model) -> SourceRecette {
    SourceRecette {
        id: model.id,
        budget_id: model.budget_id,
        libelle: model.libelle,
        nature: model.nature,
        montant: model.montant,
        created_at: model.created_at,
    }
}
