use sea_orm::entity::prelude::*;

/// Annual budget (PAA) of a centre.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub nom: String,
    pub annee: i32,
    pub type_budget: String,
    pub statut: String,
    pub montant_total: f64,
    pub montant_valide: f64,
    pub montant_restant: f64,
    pub description: Option<String>,
    pub centre_id: Uuid,
    pub cree_par: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::centres::Entity",
        from = "Column::CentreId",
        to = "super::centres::Column::Id"
    )]
    Centre,
    #[sea_orm(has_many = "super::lignes_budgetaires::Entity")]
    LignesBudgetaires,
    #[sea_orm(has_many = "super::sources_recettes::Entity")]
    SourcesRecettes,
}

impl Related<super::centres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Centre.def()
    }
}

impl Related<super::lignes_budgetaires::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LignesBudgetaires.def()
    }
}

impl Related<super::sources_recettes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SourcesRecettes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
