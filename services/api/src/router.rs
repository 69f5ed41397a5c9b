use axum::{
    Router,
    http::HeaderValue,
    routing::{delete, get, patch, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use cgcs_core::health::health;
use cgcs_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::handlers::{
    audit::list_audit_actions,
    auth::{change_password, get_me, login},
    budget::{create_budget, delete_budget, get_budget, list_budgets, update_budget},
    centre::{create_centre, delete_centre, get_centre, list_centres, update_centre},
    chef_centre::{
        create_chef_centre, delete_chef_centre, get_chef_centre, list_chefs_centres,
        update_chef_centre,
    },
    division::{
        create_division, delete_division, get_division, list_divisions, list_regions,
        update_division,
    },
    ligne::{
        create_correspondance, create_ligne, create_source, delete_correspondance, delete_ligne,
        delete_source, update_ligne, validate_correspondance,
    },
    nbe::list_nbe_lines,
    regisseur::{
        create_regisseur, delete_regisseur, get_regisseur, list_regisseurs, update_regisseur,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/api/health", get(health))
        // Auth
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(get_me))
        .route("/api/auth/change-password", post(change_password))
        // Centres
        .route("/api/admin/centres", get(list_centres))
        .route("/api/admin/centres", post(create_centre))
        .route("/api/admin/centres/{id}", get(get_centre))
        .route("/api/admin/centres/{id}", patch(update_centre))
        .route("/api/admin/centres/{id}", delete(delete_centre))
        // Régisseurs
        .route("/api/admin/regisseurs", get(list_regisseurs))
        .route("/api/admin/regisseurs", post(create_regisseur))
        .route("/api/admin/regisseurs/{id}", get(get_regisseur))
        .route("/api/admin/regisseurs/{id}", patch(update_regisseur))
        .route("/api/admin/regisseurs/{id}", delete(delete_regisseur))
        // Chefs de centre
        .route("/api/admin/chefs-centres", get(list_chefs_centres))
        .route("/api/admin/chefs-centres", post(create_chef_centre))
        .route("/api/admin/chefs-centres/{id}", get(get_chef_centre))
        .route("/api/admin/chefs-centres/{id}", patch(update_chef_centre))
        .route("/api/admin/chefs-centres/{id}", delete(delete_chef_centre))
        // Audit
        .route("/api/admin/audit-actions", get(list_audit_actions))
        // Budgets
        .route("/api/budgets", get(list_budgets))
        .route("/api/budgets", post(create_budget))
        .route("/api/budgets/{id}", get(get_budget))
        .route("/api/budgets/{id}", patch(update_budget))
        .route("/api/budgets/{id}", delete(delete_budget))
        // Lignes budgétaires
        .route("/api/budgets/{id}/lignes", post(create_ligne))
        .route("/api/budgets/{id}/lignes/{ligne_id}", patch(update_ligne))
        .route("/api/budgets/{id}/lignes/{ligne_id}", delete(delete_ligne))
        // Correspondances
        .route(
            "/api/budgets/{id}/lignes/{ligne_id}/correspondances",
            post(create_correspondance),
        )
        .route(
            "/api/budgets/{id}/lignes/{ligne_id}/correspondances/{correspondance_id}",
            delete(delete_correspondance),
        )
        .route(
            "/api/budgets/{id}/lignes/{ligne_id}/correspondances/{correspondance_id}/validation",
            patch(validate_correspondance),
        )
        // Sources de recette
        .route("/api/budgets/{id}/sources", post(create_source))
        .route("/api/budgets/{id}/sources/{source_id}", delete(delete_source))
        // Divisions administratives
        .route("/api/divisions-administratives", get(list_divisions))
        .route("/api/divisions-administratives", post(create_division))
        .route("/api/divisions-administratives/regions", get(list_regions))
        .route("/api/divisions-administratives/{id}", get(get_division))
        .route("/api/divisions-administratives/{id}", patch(update_division))
        .route("/api/divisions-administratives/{id}", delete(delete_division))
        // NBE
        .route("/api/nbe", get(list_nbe_lines))
        .with_state(state)
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
}

/// CORS for the dashboard: a single allowed origin, or any origin when unset.
pub fn cors_layer(origin: Option<HeaderValue>) -> CorsLayer {
    match origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::permissive(),
    }
}
