//! sea-orm entities for the CGCS database.
//!
//! Enum-like columns (`role`, `status`, `statut`, `action`) are stored as text;
//! the service converts them to `cgcs_domain` enums at the repository boundary.

pub mod audit_actions;
pub mod budgets;
pub mod centres;
pub mod correspondances_activites;
pub mod divisions_administratives;
pub mod lignes_budgetaires;
pub mod nbe_lines;
pub mod regisseurs;
pub mod sources_recettes;
pub mod users;
