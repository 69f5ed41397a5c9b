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

use crate::domain::types::{Regisseur, RegisseurFilter};
use crate::error::ApiError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::regisseur::{
    CreateRegisseurInput, CreateRegisseurUseCase, DeleteRegisseurUseCase, GetRegisseurUseCase,
    ListRegisseursUseCase, UpdateRegisseurInput, UpdateRegisseurUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisseurResponse {
    pub id: Uuid,
    pub code: String,
    pub nom: String,
    pub prenom: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub region: String,
    pub active: bool,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Regisseur> for RegisseurResponse {
    fn from(regisseur: Regisseur) -> Self {
        Self {
            id: regisseur.id,
            code: regisseur.code,
            nom: regisseur.nom,
            prenom: regisseur.prenom,
            email: regisseur.email,
            telephone: regisseur.telephone,
            region: regisseur.region,
            active: regisseur.active,
            created_at: regisseur.created_at,
            updated_at: regisseur.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisseurDetailResponse {
    #[serde(flatten)]
    pub regisseur: RegisseurResponse,
    pub centre_count: u64,
}

// ── GET /admin/regisseurs ────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RegisseurListQuery {
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub search: Option<String>,
    pub region: Option<String>,
    pub active: Option<bool>,
}

pub async fn list_regisseurs(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Query(query): Query<RegisseurListQuery>,
) -> Result<Json<Vec<RegisseurResponse>>, ApiError> {
    require_admin(&identity)?;
    let usecase = ListRegisseursUseCase {
        regisseurs: state.regisseur_repo(),
    };
    let regisseurs = usecase
        .execute(
            RegisseurFilter {
                search: query.search,
                region: query.region,
                active: query.active,
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(regisseurs.into_iter().map(Into::into).collect()))
}

// ── GET /admin/regisseurs/{id} ───────────────────────────────────────────────

pub async fn get_regisseur(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RegisseurDetailResponse>, ApiError> {
    require_admin(&identity)?;
    let usecase = GetRegisseurUseCase {
        regisseurs: state.regisseur_repo(),
    };
    let detail = usecase.execute(id).await?;
    Ok(Json(RegisseurDetailResponse {
        regisseur: detail.regisseur.into(),
        centre_count: detail.centre_count,
    }))
}

// ── POST /admin/regisseurs ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRegisseurRequest {
    pub code: String,
    pub nom: String,
    pub prenom: String,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub region: String,
    pub active: Option<bool>,
}

pub async fn create_regisseur(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateRegisseurRequest>,
) -> Result<(StatusCode, Json<RegisseurResponse>), ApiError> {
    require_admin(&identity)?;
    let usecase = CreateRegisseurUseCase {
        regisseurs: state.regisseur_repo(),
        audit: state.audit_repo(),
    };
    let regisseur = usecase
        .execute(
            identity.user_id,
            CreateRegisseurInput {
                code: body.code,
                nom: body.nom,
                prenom: body.prenom,
                email: body.email,
                telephone: body.telephone,
                region: body.region,
                active: body.active,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(regisseur.into())))
}

// ── PATCH /admin/regisseurs/{id} ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRegisseurRequest {
    pub code: Option<String>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub region: Option<String>,
    pub active: Option<bool>,
}

pub async fn update_regisseur(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateRegisseurRequest>,
) -> Result<Json<RegisseurResponse>, ApiError> {
    require_admin(&identity)?;
    let usecase = UpdateRegisseurUseCase {
        regisseurs: state.regisseur_repo(),
        audit: state.audit_repo(),
    };
    let regisseur = usecase
        .execute(
            identity.user_id,
            id,
            UpdateRegisseurInput {
                code: body.code,
                nom: body.nom,
                prenom: body.prenom,
                email: body.email,
                telephone: body.telephone,
                region: body.region,
                active: body.active,
            },
        )
        .await?;
    Ok(Json(regisseur.into()))
}

// ── DELETE /admin/regisseurs/{id} ────────────────────────────────────────────

pub async fn delete_regisseur(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_admin(&identity)?;
    let usecase = DeleteRegisseurUseCase {
        regisseurs: state.regisseur_repo(),
        audit: state.audit_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
