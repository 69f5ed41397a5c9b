use sea_orm::entity::prelude::*;

/// Budget line item with its chapitre/section/paragraphe/article classification.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "lignes_budgetaires")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::budgets::Entity",
        from = "Column::BudgetId",
        to = "super::budgets::Column::Id"
    )]
    Budget,
    #[sea_orm(has_many = "super::correspondances_activites::Entity")]
    CorrespondancesActivites,
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budget.def()
    }
}

impl Related<super::correspondances_activites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CorrespondancesActivites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
