use sea_orm::entity::prelude::*;

/// Login account. Chefs de centre are users with role `CHEF_CENTRE`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    pub nom: String,
    pub prenom: String,
    pub role: String,
    pub status: String,
    #[sea_orm(unique)]
    pub code: Option<String>,
    pub telephone: Option<String>,
    pub centre_id: Option<Uuid>,
    pub regisseur_id: Option<Uuid>,
    pub must_change_password: bool,
    pub last_login_at: Option<chrono::DateTime<chrono::Utc>>,
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
    #[sea_orm(
        belongs_to = "super::regisseurs::Entity",
        from = "Column::RegisseurId",
        to = "super::regisseurs::Column::Id"
    )]
    Regisseur,
    #[sea_orm(has_many = "super::audit_actions::Entity")]
    AuditActions,
}

impl Related<super::centres::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Centre.def()
    }
}

impl Related<super::regisseurs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Regisseur.def()
    }
}

impl Related<super::audit_actions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuditActions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
