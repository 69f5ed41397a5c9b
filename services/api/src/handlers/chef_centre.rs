use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_domain::pagination::PageRequest;
use cgcs_domain::user::UserStatus;

use crate::domain::types::ChefCentreFilter;
use crate::error::ApiError;
use crate::handlers::{UserResponse, require_admin};
use crate::state::AppState;
use crate::usecase::chef_centre::{
    CreateChefCentreInput, CreateChefCentreUseCase, DeleteChefCentreUseCase, GetChefCentreUseCase,
    ListChefsCentresUseCase, UpdateChefCentreInput, UpdateChefCentreUseCase,
};

// ── GET /admin/chefs-centres ─────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChefCentreListQuery {
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub search: Option<String>,
    pub centre_id: Option<Uuid>,
    pub regisseur_id: Option<Uuid>,
}

pub async fn list_chefs_centres(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Query(query): Query<ChefCentreListQuery>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    require_admin(&identity)?;
    let usecase = ListChefsCentresUseCase {
        users: state.user_repo(),
    };
    let chefs = usecase
        .execute(
            ChefCentreFilter {
                search: query.search,
                centre_id: query.centre_id,
                regisseur_id: query.regisseur_id,
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(chefs.into_iter().map(Into::into).collect()))
}

// ── GET /admin/chefs-centres/{id} ────────────────────────────────────────────

pub async fn get_chef_centre(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    require_admin(&identity)?;
    let usecase = GetChefCentreUseCase {
        users: state.user_repo(),
    };
    let chef = usecase.execute(id).await?;
    Ok(Json(chef.into()))
}

// ── POST /admin/chefs-centres ────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChefCentreRequest {
    pub email: String,
    pub password: String,
    pub nom: String,
    pub prenom: String,
    pub code: Option<String>,
    pub telephone: Option<String>,
    pub centre_id: Uuid,
}

pub async fn create_chef_centre(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateChefCentreRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    require_admin(&identity)?;
    let usecase = CreateChefCentreUseCase {
        users: state.user_repo(),
        centres: state.centre_repo(),
        audit: state.audit_repo(),
    };
    let chef = usecase
        .execute(
            identity.user_id,
            CreateChefCentreInput {
                email: body.email,
                password: body.password,
                nom: body.nom,
                prenom: body.prenom,
                code: body.code,
                telephone: body.telephone,
                centre_id: body.centre_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(chef.into())))
}

// ── PATCH /admin/chefs-centres/{id} ──────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChefCentreRequest {
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub telephone: Option<String>,
    pub code: Option<String>,
    pub status: Option<UserStatus>,
    pub centre_id: Option<Uuid>,
}

pub async fn update_chef_centre(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateChefCentreRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    require_admin(&identity)?;
    let usecase = UpdateChefCentreUseCase {
        users: state.user_repo(),
        centres: state.centre_repo(),
        audit: state.audit_repo(),
    };
    let chef = usecase
        .execute(
            identity.user_id,
            id,
            UpdateChefCentreInput {
                nom: body.nom,
                prenom: body.prenom,
                telephone: body.telephone,
                code: body.code,
                status: body.status,
                centre_id: body.centre_id,
            },
        )
        .await?;
    Ok(Json(chef.into()))
}

// ── DELETE /admin/chefs-centres/{id} ─────────────────────────────────────────

pub async fn delete_chef_centre(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    require_admin(&identity)?;
    let usecase = DeleteChefCentreUseCase {
        users: state.user_repo(),
        audit: state.audit_repo(),
    };
    usecase.execute(identity.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
