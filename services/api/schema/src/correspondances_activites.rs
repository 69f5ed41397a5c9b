use sea_orm::entity::prelude::*;

/// Mapping from a medical activity to a budget line with an allocation percentage.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "correspondances_activites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub valide_le: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::lignes_budgetaires::Entity",
        from = "Column::LigneBudgetaireId",
        to = "super::lignes_budgetaires::Column::Id"
    )]
    LigneBudgetaire,
}

impl Related<super::lignes_budgetaires::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LigneBudgetaire.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
