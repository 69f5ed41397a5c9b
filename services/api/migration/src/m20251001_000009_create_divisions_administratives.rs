use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DivisionsAdministratives::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(DivisionsAdministratives::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(DivisionsAdministratives::Region)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DivisionsAdministratives::Departement)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DivisionsAdministratives::ChefLieu)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DivisionsAdministratives::SousPrefecture)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DivisionsAdministratives::Commune)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(DivisionsAdministratives::Code)
                            .string_len(32)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(DivisionsAdministratives::Cle)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(DivisionsAdministratives::Active)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(DivisionsAdministratives::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(DivisionsAdministratives::UpdatedAt)
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
                    .table(DivisionsAdministratives::Table)
                    .col(DivisionsAdministratives::Region)
                    .col(DivisionsAdministratives::Departement)
                    .name("idx_divisions_administratives_region_departement")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(DivisionsAdministratives::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum DivisionsAdministratives {
    Table,
    Id,
    Region,
    Departement,
    ChefLieu,
    SousPrefecture,
    Commune,
    Code,
    Cle,
    Active,
    CreatedAt,
    UpdatedAt,
}
