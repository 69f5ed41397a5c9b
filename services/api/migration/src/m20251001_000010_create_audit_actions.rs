use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditActions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuditActions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AuditActions::UserId).uuid().null())
                    .col(ColumnDef::new(AuditActions::Action).string_len(32).not_null())
                    .col(ColumnDef::new(AuditActions::Entity).string_len(64).not_null())
                    .col(ColumnDef::new(AuditActions::EntityId).uuid().null())
                    .col(ColumnDef::new(AuditActions::Description).text().null())
                    .col(
                        ColumnDef::new(AuditActions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_audit_actions_user_id")
                            .from(AuditActions::Table, AuditActions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(AuditActions::Table)
                    .col((AuditActions::CreatedAt, IndexOrder::Desc))
                    .name("idx_audit_actions_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditActions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AuditActions {
    Table,
    Id,
    UserId,
    Action,
    Entity,
    EntityId,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
