use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("centre not found")]
    CentreNotFound,
    #[error("regisseur not found")]
    RegisseurNotFound,
    #[error("chef de centre not found")]
    ChefCentreNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("budget not found")]
    BudgetNotFound,
    #[error("ligne budgetaire not found")]
    LigneBudgetaireNotFound,
    #[error("correspondance not found")]
    CorrespondanceNotFound,
    #[error("source de recette not found")]
    SourceRecetteNotFound,
    #[error("division not found")]
    DivisionNotFound,
    #[error("code already exists")]
    CodeAlreadyExists,
    #[error("email already exists")]
    EmailAlreadyExists,
    #[error("division already exists")]
    DivisionAlreadyExists,
    #[error("entity is still referenced")]
    EntityInUse,
    #[error("centre already has a chef de centre")]
    CentreAlreadyHasChef,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account disabled")]
    AccountDisabled,
    #[error("forbidden")]
    Forbidden,
    #[error("password must be at least 8 characters")]
    InvalidPassword,
    #[error("pourcentage must be between 0 and 100")]
    InvalidPercentage,
    #[error("amount must not be negative")]
    InvalidAmount,
    #[error("invalid value")]
    InvalidValue,
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CentreNotFound => "CENTRE_NOT_FOUND",
            Self::RegisseurNotFound => "REGISSEUR_NOT_FOUND",
            Self::ChefCentreNotFound => "CHEF_CENTRE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::BudgetNotFound => "BUDGET_NOT_FOUND",
            Self::LigneBudgetaireNotFound => "LIGNE_BUDGETAIRE_NOT_FOUND",
            Self::CorrespondanceNotFound => "CORRESPONDANCE_NOT_FOUND",
            Self::SourceRecetteNotFound => "SOURCE_RECETTE_NOT_FOUND",
            Self::DivisionNotFound => "DIVISION_NOT_FOUND",
            Self::CodeAlreadyExists => "CODE_ALREADY_EXISTS",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::DivisionAlreadyExists => "DIVISION_ALREADY_EXISTS",
            Self::EntityInUse => "ENTITY_IN_USE",
            Self::CentreAlreadyHasChef => "CENTRE_ALREADY_HAS_CHEF",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountDisabled => "ACCOUNT_DISABLED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidPercentage => "INVALID_PERCENTAGE",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InvalidValue => "INVALID_VALUE",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::CentreNotFound
            | Self::RegisseurNotFound
            | Self::ChefCentreNotFound
            | Self::UserNotFound
            | Self::BudgetNotFound
            | Self::LigneBudgetaireNotFound
            | Self::CorrespondanceNotFound
            | Self::SourceRecetteNotFound
            | Self::DivisionNotFound => StatusCode::NOT_FOUND,
            Self::CodeAlreadyExists
            | Self::EmailAlreadyExists
            | Self::DivisionAlreadyExists
            | Self::EntityInUse
            | Self::CentreAlreadyHasChef => StatusCode::CONFLICT,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::AccountDisabled | Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidPassword
            | Self::InvalidPercentage
            | Self::InvalidAmount
            | Self::InvalidValue
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
