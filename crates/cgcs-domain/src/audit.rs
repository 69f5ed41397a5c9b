//! Audit log action kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::UnknownVariant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditKind {
    Create,
    Update,
    Delete,
    Login,
    PasswordChange,
    Validate,
}

impl AuditKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::Login => "LOGIN",
            Self::PasswordChange => "PASSWORD_CHANGE",
            Self::Validate => "VALIDATE",
        }
    }
}

impl fmt::Display for AuditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATE" => Ok(Self::Create),
            "UPDATE" => Ok(Self::Update),
            "DELETE" => Ok(Self::Delete),
            "LOGIN" => Ok(Self::Login),
            "PASSWORD_CHANGE" => Ok(Self::PasswordChange),
            "VALIDATE" => Ok(Self::Validate),
            other => Err(UnknownVariant {
                kind: "audit action",
                value: other.to_owned(),
            }),
        }
    }
}
