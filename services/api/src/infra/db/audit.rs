use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use cgcs_api_schema::audit_actions;
use cgcs_domain::pagination::PageRequest;

use crate::domain::repository::AuditRepository;
use crate::domain::types::{AuditAction, AuditFilter};
use crate::error::ApiError;

#[derive(Clone)]
pub struct DbAuditRepository {
    pub db: DatabaseConnection,
}

impl AuditRepository for DbAuditRepository {
    async fn record(&self, action: &AuditAction) -> Result<(), ApiError> {
        audit_actions::ActiveModel {
            id: Set(action.id),
            user_id: Set(action.user_id),
            action: Set(action.action.as_str().to_owned()),
            entity: Set(action.entity.clone()),
            entity_id: Set(action.entity_id),
            description: Set(action.description.clone()),
            created_at: Set(action.created_at),
        }
        .insert(&self.db)
        .await
        .context("record audit action")?;
        Ok(())
    }

    async fn list(
        &self,
        filter: &AuditFilter,
        page: PageRequest,
    ) -> Result<Vec<AuditAction>, ApiError> {
        let mut query = audit_actions::Entity::find();
        if let Some(entity) = &filter.entity {
            query = query.filter(audit_actions::Column::Entity.eq(entity.as_str()));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(audit_actions::Column::UserId.eq(user_id));
        }
        let models = query
            .order_by_desc(audit_actions::Column::CreatedAt)
            .order_by_desc(audit_actions::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list audit actions")?;
        models.into_iter().map(audit_from_model).collect()
    }
}

fn audit_from_model(model: audit_actions::Model) -> Result<AuditAction, ApiError> {
    Ok(AuditAction {
        id: model.id,
        user_id: model.user_id,
        action: model.action.parse().context("parse audit action")?,
        entity: model.entity,
        entity_id: model.entity_id,
        description: model.description,
        created_at: model.created_at,
    })
}
