use sea_orm::entity::prelude::*;

/// Health centre, the primary organizational unit.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "centres")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
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
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::regisseurs::Entity",
        from = "Column::RegisseurId",
        to = "super::regisseurs::Column::Id"
    )]
    Regisseur,
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
    #[sea_orm(has_many = "super::budgets::Entity")]
    Budgets,
}

impl Related<super::regisseurs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Regisseur.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::budgets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Budgets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
