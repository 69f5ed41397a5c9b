use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;

use crate::domain::types::{Correspondance, LigneBudgetaire, LigneDetail, SourceRecette};
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::ligne::{
    CreateCorrespondanceInput, CreateCorrespondanceUseCase, CreateLigneInput, CreateLigneUseCase,
    CreateSourceInput, CreateSourceUseCase, DeleteCorrespondanceUseCase, DeleteLigneUseCase,
    DeleteSourceUseCase, UpdateLigneInput, UpdateLigneUseCase, ValidateCorrespondanceUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LigneResponse {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub code: String,
    pub libelle: String,
    pub montant_prevu: f64,
    pub chapitre: Option<String>,
    pub section: Option<String>,
    pub paragraphe: Option<String>,
    pub article: Option<String>,
    pub nbe_ligne: Option<String>,
    pub correspondances: Vec<CorrespondanceResponse>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl LigneResponse {
    fn new(ligne: LigneBudgetaire, correspondances: Vec<Correspondance>) -> Self {
        Self {
            id: ligne.id,
            budget_id: ligne.budget_id,
            code: ligne.code,
            libelle: ligne.libelle,
            montant_prevu: ligne.montant_prevu,
            chapitre: ligne.chapitre,
            section: ligne.section,
            paragraphe: ligne.paragraphe,
            article: ligne.article,
            nbe_ligne: ligne.nbe_ligne,
            correspondances: correspondances.into_iter().map(Into::into).collect(),
            created_at: ligne.created_at,
            updated_at: ligne.updated_at,
        }
    }
}

impl From<LigneDetail> for LigneResponse {
    fn from(detail: LigneDetail) -> Self {
        Self::new(detail.ligne, detail.correspondances)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrespondanceResponse {
    pub id: Uuid,
    pub ligne_budgetaire_id: Uuid,
    pub code_activite: String,
    pub nom_activite: String,
    pub categorie: String,
    pub sous_categorie: Option<String>,
    pub pourcentage: f64,
    pub montant_max: Option<f64>,
    pub priorite: i32,
    pub valide: bool,
    pub valide_par: Option<Uuid>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms_opt")]
    pub valide_le: Option<DateTime<Utc>>,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<Correspondance> for CorrespondanceResponse {
    fn from(c: Correspondance) -> Self {
        Self {
            id: c.id,
            ligne_budgetaire_id: c.ligne_budgetaire_id,
            code_activite: c.code_activite,
            nom_activite: c.nom_activite,
            categorie: c.categorie,
            sous_categorie: c.sous_categorie,
            pourcentage: c.pourcentage,
            montant_max: c.montant_max,
            priorite: c.priorite,
            valide: c.valide,
            valide_par: c.valide_par,
            valide_le: c.valide_le,
            created_at: c.created_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceResponse {
    pub id: Uuid,
    pub budget_id: Uuid,
    pub libelle: String,
    pub nature: Option<String>,
    pub montant: f64,
    #[serde(serialize_with = "cgcs_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<SourceRecette> for SourceResponse {
    fn from(source: SourceRecette) -> Self {
        Self {
            id: source.id,
            budget_id: source.budget_id,
            libelle: source.libelle,
            nature: source.nature,
            montant: source.montant,
            created_at: source.created_at,
        }
    }
}

// ── POST /budgets/{id}/lignes ────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLigneRequest {
    pub code: String,
    pub libelle: String,
    pub montant_prevu: Option<f64>,
    pub chapitre: Option<String>,
    pub section: Option<String>,
    pub paragraphe: Option<String>,
    pub article: Option<String>,
    pub nbe_ligne: Option<String>,
}

pub async fn create_ligne(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(budget_id): Path<Uuid>,
    Json(body): Json<CreateLigneRequest>,
) -> Result<(StatusCode, Json<LigneResponse>), ApiError> {
    let usecase = CreateLigneUseCase {
        budgets: state.budget_repo(),
        audit: state.audit_repo(),
    };
    let ligne = usecase
        .execute(
            &identity,
            budget_id,
            CreateLigneInput {
                code: body.code,
                libelle: body.libelle,
                montant_prevu: body.montant_prevu,
                chapitre: body.chapitre,
                section: body.section,
                paragraphe: body.paragraphe,
                article: body.article,
                nbe_ligne: body.nbe_ligne,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(LigneResponse::new(ligne, Vec::new()))))
}

// ── PATCH /budgets/{id}/lignes/{ligne_id} ────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLigneRequest {
    pub code: Option<String>,
    pub libelle: Option<String>,
    pub montant_prevu: Option<f64>,
    pub chapitre: Option<String>,
    pub section: Option<String>,
    pub paragraphe: Option<String>,
    pub article: Option<String>,
    pub nbe_ligne: Option<String>,
}

pub async fn update_ligne(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path((budget_id, ligne_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<UpdateLigneRequest>,
) -> Result<Json<LigneResponse>, ApiError> {
    let usecase = UpdateLigneUseCase {
        budgets: state.budget_repo(),
        audit: state.audit_repo(),
    };
    let ligne = usecase
        .execute(
            &identity,
            budget_id,
            ligne_id,
            UpdateLigneInput {
                code: body.code,
                libelle: body.libelle,
                montant_prevu: body.montant_prevu,
                chapitre: body.chapitre,
                section: body.section,
                paragraphe: body.paragraphe,
                article: body.article,
                nbe_ligne: body.nbe_ligne,
            },
        )
        .await?;
    Ok(Json(LigneResponse::new(ligne, Vec::new())))
}

// ── DELETE /budgets/{id}/lignes/{ligne_id} ───────────────────────────────────

pub async fn delete_ligne(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path((budget_id, ligne_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteLigneUseCase {
        budgets: state.budget_repo(),
        audit: state.audit_repo(),
    };
    usecase.execute(&identity, budget_id, ligne_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /budgets/{id}/lignes/{ligne_id}/correspondances ─────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCorrespondanceRequest {
    pub code_activite: String,
    pub nom_activite: String,
    pub categorie: String,
    pub sous_categorie: Option<String>,
    pub pourcentage: Option<f64>,
    pub montant_max: Option<f64>,
    pub priorite: Option<i32>,
}

pub async fn create_correspondance(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path((budget_id, ligne_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<CreateCorrespondanceRequest>,
) -> Result<(StatusCode, Json<CorrespondanceResponse>), ApiError> {
    let usecase = CreateCorrespondanceUseCase {
        budgets: state.budget_repo(),
        audit: state.audit_repo(),
    };
    let correspondance = usecase
        .execute(
            &identity,
            budget_id,
            ligne_id,
            CreateCorrespondanceInput {
                code_activite: body.code_activite,
                nom_activite: body.nom_activite,
                categorie: body.categorie,
                sous_categorie: body.sous_categorie,
                pourcentage: body.pourcentage,
                montant_max: body.montant_max,
                priorite: body.priorite,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(correspondance.into())))
}

// ── PATCH /budgets/{id}/lignes/{ligne_id}/correspondances/{id}/validation ────

#[derive(Deserialize)]
pub struct ValidationRequest {
    pub valide: bool,
}

pub async fn validate_correspondance(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path((budget_id, ligne_id, correspondance_id)): Path<(Uuid, Uuid, Uuid)>,
    Json(body): Json<ValidationRequest>,
) -> Result<Json<CorrespondanceResponse>, ApiError> {
    let usecase = ValidateCorrespondanceUseCase {
        budgets: state.budget_repo(),
        audit: state.audit_repo(),
    };
    let correspondance = usecase
        .execute(
            &identity,
            budget_id,
            ligne_id,
            correspondance_id,
            body.valide,
        )
        .await?;
    Ok(Json(correspondance.into()))
}

// ── DELETE /budgets/{id}/lignes/{ligne_id}/correspondances/{id} ──────────────

pub async fn delete_correspondance(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path((budget_id, ligne_id, correspondance_id)): Path<(Uuid, Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteCorrespondanceUseCase {
        budgets: state.budget_repo(),
        audit: state.audit_repo(),
    };
    usecase
        .execute(&identity, budget_id, ligne_id, correspondance_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /budgets/{id}/sources ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateSourceRequest {
    pub libelle: String,
    pub nature: Option<String>,
    pub montant: f64,
}

pub async fn create_source(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path(budget_id): Path<Uuid>,
    Json(body): Json<CreateSourceRequest>,
) -> Result<(StatusCode, Json<SourceResponse>), ApiError> {
    let usecase = CreateSourceUseCase {
        budgets: state.budget_repo(),
        audit: state.audit_repo(),
    };
    let source = usecase
        .execute(
            &identity,
            budget_id,
            CreateSourceInput {
                libelle: body.libelle,
                nature: body.nature,
                montant: body.montant,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(source.into())))
}

// ── DELETE /budgets/{id}/sources/{source_id} ─────────────────────────────────

pub async fn delete_source(
    identity: AuthIdentity,
    State(state): State<AppState>,
    Path((budget_id, source_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let usecase = DeleteSourceUseCase {
        budgets: state.budget_repo(),
        audit: state.audit_repo(),
    };
    usecase.execute(&identity, budget_id, source_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
