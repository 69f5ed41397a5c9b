use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Centres::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Centres::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Centres::Code)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Centres::Nom).string().not_null())
                    .col(ColumnDef::new(Centres::Adresse).string().null())
                    .col(ColumnDef::new(Centres::Ville).string().null())
                    .col(ColumnDef::new(Centres::Commune).string().null())
                    .col(ColumnDef::new(Centres::Departement).string().null())
                    .col(ColumnDef::new(Centres::Region).string().not_null())
                    .col(ColumnDef::new(Centres::TypeCentre).string_len(64).not_null())
                    .col(ColumnDef::new(Centres::Niveau).string_len(64).null())
                    .col(ColumnDef::new(Centres::Telephone).string_len(32).null())
                    .col(
                        ColumnDef::new(Centres::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(Centres::RegisseurId).uuid().null())
                    .col(
                        ColumnDef::new(Centres::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Centres::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_centres_regisseur_id")
                            .from(Centres::Table, Centres::RegisseurId)
                            .to(Regisseurs::Table, Regisseurs::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Centres::Table)
                    .col(Centres::RegisseurId)
                    .name("idx_centres_regisseur_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Centres::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Centres {
    Table,
    Id,
    Code,
    Nom,
    Adresse,
    Ville,
    Commune,
    Departement,
    Region,
    TypeCentre,
    Niveau,
    Telephone,
    Active,
    RegisseurId,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Regisseurs {
    Table,
    Id,
}
