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

use crate::domain::types::{Centre, CentreFilter, User};
use crate::error::ApiError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::centre::{
    CreateCentreInput, CreateCentreUseCase, DeleteCentreUseCase, GetCentreUseCase,
    ListCentresUseCase, UpdateCentreInput, UpdateCentreUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CentreResponse {
    pub id: Uuid,
    pub code: String,
    pub nom: String,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub commune: Option<String>,
    pub departement: Option<String>,
    pub region: String,
    pub type_centre: String,
    pub niveau: Option<String>,
    pub telephone: Option<String>,
    pub active: bool,
    pub regisseur_id: Option<Uuid>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Centre> for CentreResponse {
    fn from(centre: Centre) -> Self {
        Self {
            id: centre.id,
            code: centre.code,
            nom: centre.nom,
            adresse: centre.adresse,
            ville: centre.ville,
            commune: centre.commune,
            departement: centre.departement,
            region: centre.region,
            type_centre: centre.type_centre,
            niveau: centre.niveau,
            telephone: centre.telephone,
            active: centre.active,
            regisseur_id: centre.regisseur_id,
            created_at: centre.created_at,
            updated_at: centre.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChefCentreSummary {
    pub id: Uuid,
    pub email: String,
    pub nom: String,
    pub prenom: String,
    pub telephone: Option<String>,
}

impl From<User> for ChefCentreSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            nom: user.nom,
            prenom: user.prenom,
            telephone: user.telephone,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CentreDetailResponse {
    #[serde(flatten)]
    pub centre: CentreResponse,
    pub chef_centre: Option<ChefCentreSummary>,
}

// ── GET /admin/centres ───────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CentreListQuery {
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub search: Option<String>,
    pub region: Option<String>,
    pub regisseur_id: Option<Uuid>,
    pub active: Option<bool>,
}

pub async fn list_centres(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Query(query): Query<CentreListQuery>,
) -> Result<Json<Vec<CentreResponse>>, ApiError> {
    require_admin(&identity)?;
    let usecase = ListCentresUseCase {
        centres: state.centre_repo(),
    };
    let centres = usecase
        .execute(
            CentreFilter {
                search: query.search,
                region: query.region,
                regisseur_id: query.regisseur_id,
                active: query.active,
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(centres.into_iter().map(Into::into).collect()))
}

// ── GET /admin/centres/{id} ──────────────────────────────────────────────────

pub async fn get_centre(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CentreDetailResponse>, ApiError> {
    require_admin(&identity)?;
    let usecase = GetCentreUseCase {
        centres: state.centre_repo(),
        users: state.user_repo(),
    };
    let detail = usecase.execute(id).await?;
    Ok(Json(CentreDetailResponse {
        centre: detail.centre.into(),
        chef_centre: detail.chef_centre.map(Into::into),
    }))
}

// ── POST /admin/centres ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCentreRequest {
    pub code: String,
    pub nom: String,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub commune: Option<String>,
    pub departement: Option<String>,
    pub region: String,
    pub type_centre: String,
    pub niveau: Option<String>,
    pub telephone: Option<String>,
    pub active: Option<bool>,
    pub regisseur_id: Option<Uuid>,
}

pub async fn create_centre(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateCentreRequest>,
) -> Result<(StatusCode, Json<CentreResponse>), ApiError> {
    require_admin(&identity)?;
    let usecase = CreateCentreUseCase {
        centres: state.centre_repo(),
        regisseurs: state.regisseur_repo(),
        audit: state.audit_repo(),
    };
    let centre = usecase
        .execute(
            identity.user_id,
            CreateCentreInput {
                code: body.code,
                nom: body.nom,
                adresse: body.adresse,
                ville: body.ville,
                commune: body.commune,
                departement: body.departement,
                region: body.region,
                type_centre: body.type_centre,
                niveau: body.niveau,
                telephone: body.telephone,
                active: body.active,
                regisseur_id: body.regisseur_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(centre.into())))
}

// ── PATCH /admin/centres/{id} ────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCentreRequest {
    pub code: Option<String>,
    pub nom: Option<String>,
    pub adresse: Option<String>,
    pub ville: Option<String>,
    pub commune: Option<String>,
    pub departement: Option<String>,
    pub region: Option<String>,
    pub type_centre: Option<String>,
    pub niveau: Option<String>,
    pub telephone: Option<String>,
    pub active: Option<bool>,
    pub regisseur_id: Option<Uuid>,
}

pub async fn update_centre(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateCentreRequest>,
) -> Result<Json<CentreResponse>, ApiError> {
    require_admin(&identity)?;
    let usecase = UpdateCentreUseCase {
        centres: state.centre_repo(),
        regisseurs: state.regisseur_repo(),
        users: state.user_repo(),
        audit: state.audit_repo(),
    };
    let centre = usecase
        .execute(
            identity.user_id,
            id,
            UpdateCentreInput {
                code: body.code,
                nom: body.nom,
                adresse: body.adresse,
                ville: body.ville,
                commune: body.commune,
                departement: body.departement,
                region: body.region,
                type_centre: body.type_centre,
                niveau: body.niveau,
                telephone: body.telephone,
                active: body.active,
                regisseur_id: body.regisseur_id,
            },
        )
        .await?;
    Ok(Json(centre.into()))
}

// ── DELETE /admin/centres/{id} ───────────────────────────────────────────────

pub async fn delete_centre(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_admin(&identity)?;
    let usecase = DeleteCentreUseCase {
        centres: state.centre_repo(),
        audit: state.audit_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
