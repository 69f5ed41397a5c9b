use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LignesBudgetaires::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LignesBudgetaires::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LignesBudgetaires::BudgetId).uuid().not_null())
                    .col(
                        ColumnDef::new(LignesBudgetaires::Code)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(ColumnDef::new(LignesBudgetaires::Libelle).string().not_null())
                    .col(
                        ColumnDef::new(LignesBudgetaires::MontantPrevu)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(LignesBudgetaires::Chapitre).string_len(32).null())
                    .col(ColumnDef::new(LignesBudgetaires::Section).string_len(32).null())
                    .col(
                        ColumnDef::new(LignesBudgetaires::Paragraphe)
                            .string_len(32)
                            .null(),
                    )
                    .col(ColumnDef::new(LignesBudgetaires::Article).string_len(32).null())
                    .col(ColumnDef::new(LignesBudgetaires::NbeLigne).string_len(32).null())
                    .col(
                        ColumnDef::new(LignesBudgetaires::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(LignesBudgetaires::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lignes_budgetaires_budget_id")
                            .from(LignesBudgetaires::Table, LignesBudgetaires::BudgetId)
                            .to(Budgets::Table, Budgets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(LignesBudgetaires::Table)
                    .col(LignesBudgetaires::BudgetId)
                    .col(LignesBudgetaires::Code)
                    .unique()
                    .name("uq_lignes_budgetaires_budget_id_code")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LignesBudgetaires::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum LignesBudgetaires {
    Table,
    Id,
    BudgetId,
    Code,
    Libelle,
    MontantPrevu,
    Chapitre,
    Section,
    Paragraphe,
    Article,
    NbeLigne,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
}
