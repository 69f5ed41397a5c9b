use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SourcesRecettes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(SourcesRecettes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(SourcesRecettes::BudgetId).uuid().not_null())
                    .col(ColumnDef::new(SourcesRecettes::Libelle).string().not_null())
                    .col(ColumnDef::new(SourcesRecettes::Nature).string_len(64).null())
                    .col(
                        ColumnDef::new(SourcesRecettes::Montant)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(SourcesRecettes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sources_recettes_budget_id")
                            .from(SourcesRecettes::Table, SourcesRecettes::BudgetId)
                            .to(Budgets::Table, Budgets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SourcesRecettes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum SourcesRecettes {
    Table,
    Id,
    BudgetId,
    Libelle,
    Nature,
    Montant,
    CreatedAt,
}

#[derive(Iden)]
enum Budgets {
    Table,
    Id,
}
