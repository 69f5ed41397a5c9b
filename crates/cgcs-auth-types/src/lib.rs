//! Auth types shared across CGCS crates.
//!
//! Provides JWT issue/validation and the `AuthIdentity` bearer-token extractor.

pub mod identity;
pub mod token;
