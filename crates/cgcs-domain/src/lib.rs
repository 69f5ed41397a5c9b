//! Domain types shared across all CGCS crates.
//!
//! This crate contains only pure types with no framework dependencies.
//! Import in `usecase/` and `domain/` layers; persistence code converts to and
//! from the string forms exposed here.

pub mod audit;
pub mod budget;
pub mod division;
pub mod pagination;
pub mod user;

/// Returned when a stored or submitted enum value is not one of the known variants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
