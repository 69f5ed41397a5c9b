use sea_orm::entity::prelude::*;

/// Administrative division reference row used to normalize addresses.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "divisions_administratives")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub region: String,
    pub departement: String,
    pub chef_lieu: String,
    pub sous_prefecture: String,
    pub commune: String,
    pub code: Option<String>,
    /// Normalized five-part key, unique.
    pub cle: String,
    pub active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
