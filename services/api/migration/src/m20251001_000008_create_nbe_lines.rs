use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NbeLines::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(NbeLines::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(NbeLines::Ligne).string_len(32).null())
                    .col(ColumnDef::new(NbeLines::Libelle).text().not_null())
                    .col(ColumnDef::new(NbeLines::ObjetDepense).text().null())
                    .col(ColumnDef::new(NbeLines::Categorie).string().null())
                    .col(ColumnDef::new(NbeLines::SousCategorie).string().null())
                    .col(
                        ColumnDef::new(NbeLines::IsHeader)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(NbeLines::IsHighlighted)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(NbeLines::Ordre).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(NbeLines::Table)
                    .col(NbeLines::Ordre)
                    .name("idx_nbe_lines_ordre")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NbeLines::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum NbeLines {
    Table,
    Id,
    Ligne,
    Libelle,
    ObjetDepense,
    Categorie,
    SousCategorie,
    IsHeader,
    IsHighlighted,
    Ordre,
}
