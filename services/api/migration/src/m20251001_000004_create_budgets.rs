use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Budgets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Budgets::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Budgets::Code)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Budgets::Nom).string().not_null())
                    .col(ColumnDef::new(Budgets::Annee).integer().not_null())
                    .col(ColumnDef::new(Budgets::TypeBudget).string_len(64).not_null())
                    .col(
                        ColumnDef::new(Budgets::Statut)
                            .string_len(32)
                            .not_null()
                            .default("BROUILLON"),
                    )
                    .col(
                        ColumnDef::new(Budgets::MontantTotal)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Budgets::MontantValide)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Budgets::MontantRestant)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(Budgets::Description).text().null())
                    .col(ColumnDef::new(Budgets::CentreId).uuid().not_null())
                    .col(ColumnDef::new(Budgets::CreePar).uuid().not_null())
                    .col(
                        ColumnDef::new(Budgets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Budgets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budgets_centre_id")
                            .from(Budgets::Table, Budgets::CentreId)
                            .to(Centres::Table, Centres::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_budgets_cree_par")
                            .from(Budgets::Table, Budgets::CreePar)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Budgets::Table)
                    .col(Budgets::CentreId)
                    .col(Budgets::Annee)
                    .name("idx_budgets_centre_id_annee")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Budgets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
    Code,
    Nom,
    Annee,
    TypeBudget,
    Statut,
    MontantTotal,
    MontantValide,
    MontantRestant,
    Description,
    CentreId,
    CreePar,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Centres {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
