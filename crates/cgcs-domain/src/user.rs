//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

/// Role of an account. Determines which routes and budgets are reachable.
///
/// Wire and storage format: `"ADMIN"`, `"REGISSEUR"`, `"CHEF_CENTRE"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Regisseur,
    ChefCentre,
}

impl UserRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Regisseur => "REGISSEUR",
            Self::ChefCentre => "CHEF_CENTRE",
        }
    }

    /// ADMIN and REGISSEUR supervise centres; CHEF_CENTRE manages one.
    pub fn is_supervisor(self) -> bool {
        matches!(self, Self::Admin | Self::Regisseur)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "REGISSEUR" => Ok(Self::Regisseur),
            "CHEF_CENTRE" => Ok(Self::ChefCentre),
            other => Err(UnknownVariant {
                kind: "user role",
                value: other.to_owned(),
            }),
        }
    }
}

/// Account status. Only `Active` accounts may log in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Inactive => "INACTIVE",
            Self::Suspended => "SUSPENDED",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "SUSPENDED" => Ok(Self::Suspended),
            other => Err(UnknownVariant {
                kind: "user status",
                value: other.to_owned(),
            }),
        }
    }
}
