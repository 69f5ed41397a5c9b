use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use cgcs_auth_types::identity::JwtSecret;
use cgcs_core::health::StartedAt;

use crate::infra::db::{
    DbAuditRepository, DbBudgetRepository, DbCentreRepository, DbDivisionRepository,
    DbNbeRepository, DbRegisseurRepository, DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub jwt_ttl_secs: u64,
    pub started_at: StartedAt,
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}

impl FromRef<AppState> for StartedAt {
    fn from_ref(state: &AppState) -> Self {
        state.started_at
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn centre_repo(&self) -> DbCentreRepository {
        DbCentreRepository {
            db: self.db.clone(),
        }
    }

    pub fn regisseur_repo(&self) -> DbRegisseurRepository {
        DbRegisseurRepository {
            db: self.db.clone(),
        }
    }

    pub fn budget_repo(&self) -> DbBudgetRepository {
        DbBudgetRepository {
            db: self.db.clone(),
        }
    }

    pub fn division_repo(&self) -> DbDivisionRepository {
        DbDivisionRepository {
            db: self.db.clone(),
        }
    }

    pub fn nbe_repo(&self) -> DbNbeRepository {
        DbNbeRepository {
            db: self.db.clone(),
        }
    }

    pub fn audit_repo(&self) -> DbAuditRepository {
        DbAuditRepository {
            db: self.db.clone(),
        }
    }
}
