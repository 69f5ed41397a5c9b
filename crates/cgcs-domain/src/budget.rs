//! Budget status.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;
use crate::user::UserRole;

/// Lifecycle label of a budget.
///
/// There is no transition graph: any status may follow any other. The only rule
/// is which roles may set a given value (see [`BudgetStatus::settable_by`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BudgetStatus {
    #[default]
    Brouillon,
    EnAttenteValidation,
    Valide,
    Rejete,
    Archive,
}

impl BudgetStatus {
    pub const ALL: [BudgetStatus; 5] = [
        Self::Brouillon,
        Self::EnAttenteValidation,
        Self::Valide,
        Self::Rejete,
        Self::Archive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Brouillon => "BROUILLON",
            Self::EnAttenteValidation => "EN_ATTENTE_VALIDATION",
            Self::Valide => "VALIDE",
            Self::Rejete => "REJETE",
            Self::Archive => "ARCHIVE",
        }
    }

    /// A chef de centre drafts and submits; supervisors may set anything.
    pub fn settable_by(self, role: UserRole) -> bool {
        role.is_supervisor() || matches!(self, Self::Brouillon | Self::EnAttenteValidation)
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownVariant {
                kind: "budget status",
                value: s.to_owned(),
            })
    }
}
