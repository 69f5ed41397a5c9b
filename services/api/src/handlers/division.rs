use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_domain::pagination::PageRequest;

use crate::domain::types::{Division, DivisionFilter};
use crate::error::ApiError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::division::{
    CreateDivisionInput, CreateDivisionUseCase, DeleteDivisionUseCase, GetDivisionUseCase,
    ListDivisionsUseCase, ListRegionsUseCase, UpdateDivisionInput, UpdateDivisionUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DivisionResponse {
    pub id: Uuid,
    pub region: String,
    pub departement: String,
    pub chef_lieu: String,
    pub sous_prefecture: String,
    pub commune: String,
    pub code: Option<String>,
    pub active: bool,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Division> for DivisionResponse {
    fn from(division: Division) -> Self {
        Self {
            id: division.id,
            region: division.region,
            departement: division.departement,
            chef_lieu: division.chef_lieu,
            sous_prefecture: division.sous_prefecture,
            commune: division.commune,
            code: division.code,
            active: division.active,
            created_at: division.created_at,
            updated_at: division.updated_at,
        }
    }
}

// ── GET /divisions-administratives ───────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DivisionListQuery {
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub region: Option<String>,
    pub departement: Option<String>,
    pub sous_prefecture: Option<String>,
    pub search: Option<String>,
    pub active: Option<bool>,
}

pub async fn list_divisions(
    _identity: AuthIdentity,
    State(state): State<AppState>,
    Query(query): Query<DivisionListQuery>,
) -> Result<Json<Vec<DivisionResponse>>, ApiError> {
    let usecase = ListDivisionsUseCase {
        divisions: state.division_repo(),
    };
    let divisions = usecase
        .execute(
            DivisionFilter {
                region: query.region,
                departement: query.departement,
                sous_prefecture: query.sous_prefecture,
                search: query.search,
                active: query.active,
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(divisions.into_iter().map(Into::into).collect()))
}

// ── GET /divisions-administratives/regions ───────────────────────────────────

pub async fn list_regions(
    _identity: AuthIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<String>>, ApiError> {
    let usecase = ListRegionsUseCase {
        divisions: state.division_repo(),
    };
    Ok(Json(usecase.execute().await?))
}

// ── GET /divisions-administratives/{id} ──────────────────────────────────────

pub async fn get_division(
    _identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DivisionResponse>, ApiError> {
    let usecase = GetDivisionUseCase {
        divisions: state.division_repo(),
    };
    Ok(Json(usecase.execute(id).await?.into()))
}

// ── POST /divisions-administratives ──────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDivisionRequest {
    pub region: String,
    pub departement: String,
    pub chef_lieu: String,
    pub sous_prefecture: String,
    pub commune: String,
    pub code: Option<String>,
    pub active: Option<bool>,
}

pub async fn create_division(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateDivisionRequest>,
) -> Result<(StatusCode, Json<DivisionResponse>), ApiError> {
    require_admin(&identity)?;
    let usecase = CreateDivisionUseCase {
        divisions: state.division_repo(),
        audit: state.audit_repo(),
    };
    let division = usecase
        .execute(
            identity.user_id,
            CreateDivisionInput {
                region: body.region,
                departement: body.departement,
                chef_lieu: body.chef_lieu,
                sous_prefecture: body.sous_prefecture,
                commune: body.commune,
                code: body.code,
                active: body.active,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(division.into())))
}

// ── PATCH /divisions-administratives/{id} ────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDivisionRequest {
    pub region: Option<String>,
    pub departement: Option<String>,
    pub chef_lieu: Option<String>,
    pub sous_prefecture: Option<String>,
    pub commune: Option<String>,
    pub code: Option<String>,
    pub active: Option<bool>,
}

pub async fn update_division(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateDivisionRequest>,
) -> Result<Json<DivisionResponse>, ApiError> {
    require_admin(&identity)?;
    let usecase = UpdateDivisionUseCase {
        divisions: state.division_repo(),
        audit: state.audit_repo(),
    };
    let division = usecase
        .execute(
            identity.user_id,
            id,
            UpdateDivisionInput {
                region: body.region,
                departement: body.departement,
                chef_lieu: body.chef_lieu,
                sous_prefecture: body.sous_prefecture,
                commune: body.commune,
                code: body.code,
                active: body.active,
            },
        )
        .await?;
    Ok(Json(division.into()))
}

// ── DELETE /divisions-administratives/{id} ───────────────────────────────────

pub async fn delete_division(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_admin(&identity)?;
    let usecase = DeleteDivisionUseCase {
        divisions: state.division_repo(),
        audit: state.audit_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
