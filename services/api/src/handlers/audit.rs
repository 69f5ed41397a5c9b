use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_domain::audit::AuditKind;
use cgcs_domain::pagination::PageRequest;

use crate::domain::types::AuditFilter;
use crate::error::ApiError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::audit::ListAuditActionsUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditActionResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: AuditKind,
    pub entity: String,
    pub entity_id: Option<Uuid>,
    pub description: Option<String>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

// ── GET /admin/audit-actions ─────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AuditListQuery {
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub entity: Option<String>,
    pub user_id: Option<Uuid>,
}

pub async fn list_audit_actions(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Query(query): Query<AuditListQuery>,
) -> Result<Json<Vec<AuditActionResponse>>, ApiError> {
    require_admin(&identity)?;
    let usecase = ListAuditActionsUseCase {
        audit: state.audit_repo(),
    };
    let actions = usecase
        .execute(
            AuditFilter {
                entity: query.entity,
                user_id: query.user_id,
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    let items = actions
        .into_iter()
        .map(|action| AuditActionResponse {
            id: action.id,
            user_id: action.user_id,
            action: action.action,
            entity: action.entity,
            entity_id: action.entity_id,
            description: action.description,
            created_at: action.created_at,
        })
        .collect();
    Ok(Json(items))
}
