use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CorrespondancesActivites::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CorrespondancesActivites::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::LigneBudgetaireId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::CodeActivite)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::NomActivite)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::Categorie)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::SousCategorie)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::Pourcentage)
                            .double()
                            .not_null()
                            .default(100.0),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::MontantMax)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::Priorite)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::Valide)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::ValidePar)
                            .uuid()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::ValideLe)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CorrespondancesActivites::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_correspondances_activites_ligne_budgetaire_id")
                            .from(
                                CorrespondancesActivites::Table,
                                CorrespondancesActivites::LigneBudgetaireId,
                            )
                            .to(LignesBudgetaires::Table, LignesBudgetaires::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_correspondances_activites_valide_par")
                            .from(
                                CorrespondancesActivites::Table,
                                CorrespondancesActivites::ValidePar,
                            )
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(CorrespondancesActivites::Table)
                    .col(CorrespondancesActivites::LigneBudgetaireId)
                    .name("idx_correspondances_activites_ligne_budgetaire_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .table(CorrespondancesActivites::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum CorrespondancesActivites {
    Table,
    Id,
    LigneBudgetaireId,
    CodeActivite,
    NomActivite,
    Categorie,
    SousCategorie,
    Pourcentage,
    MontantMax,
    Priorite,
    Valide,
    ValidePar,
    ValideLe,
    CreatedAt,
}

#[derive(Iden)]
enum LignesBudgetaires {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
