use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_domain::budget::BudgetStatus;
use cgcs_domain::pagination::PageRequest;

use crate::domain::types::{Budget, BudgetFilter};
use crate::error::ApiError;
use crate::handlers::ligne::{LigneResponse, SourceResponse};
use crate::state::AppState;
use crate::usecase::budget::{
    CreateBudgetInput, CreateBudgetUseCase, DeleteBudgetUseCase, GetBudgetUseCase,
    ListBudgetsUseCase, UpdateBudgetInput, UpdateBudgetUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetResponse {
    pub id: Uuid,
    pub code: String,
    pub nom: String,
    pub annee: i32,
    pub type_budget: String,
    pub statut: BudgetStatus,
    pub montant_total: f64,
    pub montant_valide: f64,
    pub montant_restant: f64,
    pub description: Option<String>,
    pub centre_id: Uuid,
    pub cree_par: Uuid,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<Budget> for BudgetResponse {
    fn from(budget: Budget) -> Self {
        Self {
            id: budget.id,
            code: budget.code,
            nom: budget.nom,
            annee: budget.annee,
            type_budget: budget.type_budget,
            statut: budget.statut,
            montant_total: budget.montant_total,
            montant_valide: budget.montant_valide,
            montant_restant: budget.montant_restant,
            description: budget.description,
            centre_id: budget.centre_id,
            cree_par: budget.cree_par,
            created_at: budget.created_at,
            updated_at: budget.updated_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetDetailResponse {
    #[serde(flatten)]
    pub budget: BudgetResponse,
    pub lignes: Vec<LigneResponse>,
    pub sources_recettes: Vec<SourceResponse>,
}

// ── GET /budgets ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BudgetListQuery {
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub annee: Option<i32>,
    pub centre_id: Option<Uuid>,
    pub statut: Option<BudgetStatus>,
}

pub async fn list_budgets(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Query(query): Query<BudgetListQuery>,
) -> Result<Json<Vec<BudgetResponse>>, ApiError> {
    let usecase = ListBudgetsUseCase {
        budgets: state.budget_repo(),
    };
    let budgets = usecase
        .execute(
            &identity,
            BudgetFilter {
                annee: query.annee,
                centre_id: query.centre_id,
                statut: query.statut,
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    Ok(Json(budgets.into_iter().map(Into::into).collect()))
}

// ── GET /budgets/{id} ────────────────────────────────────────────────────────

pub async fn get_budget(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BudgetDetailResponse>, ApiError> {
    let usecase = GetBudgetUseCase {
        budgets: state.budget_repo(),
    };
    let detail = usecase.execute(&identity, id).await?;
    Ok(Json(BudgetDetailResponse {
        budget: detail.budget.into(),
        lignes: detail.lignes.into_iter().map(Into::into).collect(),
        sources_recettes: detail.sources.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /budgets ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetRequest {
    pub code: String,
    pub nom: String,
    pub annee: i32,
    pub type_budget: String,
    pub centre_id: Uuid,
    pub montant_total: Option<f64>,
    pub montant_valide: Option<f64>,
    pub description: Option<String>,
}

pub async fn create_budget(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateBudgetRequest>,
) -> Result<(StatusCode, Json<BudgetResponse>), ApiError> {
    let usecase = CreateBudgetUseCase {
        budgets: state.budget_repo(),
        centres: state.centre_repo(),
        audit: state.audit_repo(),
    };
    let budget = usecase
        .execute(
            &identity,
            CreateBudgetInput {
                code: body.code,
                nom: body.nom,
                annee: body.annee,
                type_budget: body.type_budget,
                centre_id: body.centre_id,
                montant_total: body.montant_total,
                montant_valide: body.montant_valide,
                description: body.description,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(budget.into())))
}

// ── PATCH /budgets/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetRequest {
    pub nom: Option<String>,
    pub annee: Option<i32>,
    pub type_budget: Option<String>,
    pub statut: Option<BudgetStatus>,
    pub montant_total: Option<f64>,
    pub montant_valide: Option<f64>,
    pub description: Option<String>,
}

pub async fn update_budget(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateBudgetRequest>,
) -> Result<Json<BudgetResponse>, ApiError> {
    let usecase = UpdateBudgetUseCase {
        budgets: state.budget_repo(),
        audit: state.audit_repo(),
    };
    let budget = usecase
        .execute(
            &identity,
            id,
            UpdateBudgetInput {
                nom: body.nom,
                annee: body.annee,
                type_budget: body.type_budget,
                statut: body.statut,
                montant_total: body.montant_total,
                montant_valide: body.montant_valide,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(budget.into()))
}

// ── DELETE /budgets/{id} ─────────────────────────────────────────────────────

pub async fn delete_budget(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteBudgetUseCase {
        budgets: state.budget_repo(),
        audit: state.audit_repo(),
    };
    usecase.execute(&identity, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
