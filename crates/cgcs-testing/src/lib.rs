//! Test utilities for CGCS services.
//!
//! Import in tests only, never in production code.

pub mod auth;
