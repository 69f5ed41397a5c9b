use sea_orm::entity::prelude::*;

/// One row of the state budget nomenclature. The table is reloaded wholesale
/// by the import command; `ordre` preserves the spreadsheet order.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "nbe_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
