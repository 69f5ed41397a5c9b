pub mod audit;
pub mod auth;
pub mod budget;
pub mod centre;
pub mod chef_centre;
pub mod division;
pub mod ligne;
pub mod nbe;
pub mod regisseur;

#[cfg(test)]
pub(crate) mod mock;

use crate::error::ApiError;

/// Trimmed value of a mandatory text field.
fn required_text(value: String) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::MissingData);
    }
    Ok(trimmed.to_owned())
}

/// Trimmed value of an optional text field; blank becomes `None`.
fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn non_negative(amount: f64) -> Result<f64, ApiError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(ApiError::InvalidAmount);
    }
    Ok(amount)
}
