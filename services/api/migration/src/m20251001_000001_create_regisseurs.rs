use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Regisseurs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Regisseurs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Regisseurs::Code)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Regisseurs::Nom).string().not_null())
                    .col(ColumnDef::new(Regisseurs::Prenom).string().not_null())
                    .col(ColumnDef::new(Regisseurs::Email).string().null())
                    .col(ColumnDef::new(Regisseurs::Telephone).string_len(32).null())
                    .col(ColumnDef::new(Regisseurs::Region).string().not_null())
                    .col(
                        ColumnDef::new(Regisseurs::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Regisseurs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Regisseurs::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Regisseurs::Table)
                    .col(Regisseurs::Region)
                    .name("idx_regisseurs_region")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Regisseurs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Regisseurs {
    Table,
    Id,
    Code,
    Nom,
    Prenom,
    Email,
    Telephone,
    Region,
    Active,
    CreatedAt,
    UpdatedAt,
}
