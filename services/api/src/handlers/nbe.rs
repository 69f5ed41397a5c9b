use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cgcs_auth_types::identity::AuthIdentity;
use cgcs_domain::pagination::PageRequest;

use crate::domain::types::NbeFilter;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::nbe::ListNbeLinesUseCase;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NbeLineResponse {
    pub id: Uuid,
    pub ligne: Option<String>,
    pub libelle: String,
    pub objet_depense: Option<String>,
    pub categorie: Option<String>,
    pub sous_categorie: Option<String>,
    pub is_header: bool,
    pub is_highlighted: bool,
    pub ordre: i32,
}

// ── GET /nbe ─────────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct NbeListQuery {
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub categorie: Option<String>,
    pub search: Option<String>,
}

pub async fn list_nbe_lines(
    _identity: AuthIdentity,
    State(state): State<AppState>,
    Query(query): Query<NbeListQuery>,
) -> Result<Json<Vec<NbeLineResponse>>, ApiError> {
    let usecase = ListNbeLinesUseCase {
        nbe: state.nbe_repo(),
    };
    let lines = usecase
        .execute(
            NbeFilter {
                categorie: query.categorie,
                search: query.search,
            },
            PageRequest::new(query.per_page, query.page),
        )
        .await?;
    let items = lines
        .into_iter()
        .map(|line| NbeLineResponse {
            id: line.id,
            ligne: line.ligne,
            libelle: line.libelle,
            objet_depense: line.objet_depense,
            categorie: line.categorie,
            sous_categorie: line.sous_categorie,
            is_header: line.is_header,
            is_highlighted: line.is_highlighted,
            ordre: line.ordre,
        })
        .collect();
    Ok(Json(items))
}
