mod audit;
mod budget;
mod centre;
mod division;
mod nbe;
mod regisseur;
mod user;

pub use audit::DbAuditRepository;
pub use budget::DbBudgetRepository;
pub use centre::DbCentreRepository;
pub use division::DbDivisionRepository;
pub use nbe::DbNbeRepository;
pub use regisseur::DbRegisseurRepository;
pub use user::DbUserRepository;

use sea_orm::{DbErr, SqlErr};

use crate::error::ApiError;

/// Map a failed write to a domain error.
///
/// Unique violations go through `on_unique` with the driver message (which
/// names the violated constraint); foreign-key violations mean the row is
/// still referenced. Anything else is internal.
fn write_error(err: DbErr, context: &'static str, on_unique: fn(&str) -> ApiError) -> ApiError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(message)) => on_unique(&message),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => ApiError::EntityInUse,
        _ => ApiError::Internal(anyhow::Error::new(err).context(context)),
    }
}

fn code_conflict(_: &str) -> ApiError {
    ApiError::CodeAlreadyExists
}
