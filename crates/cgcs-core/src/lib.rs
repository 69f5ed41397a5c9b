//! HTTP and persistence plumbing shared by the CGCS service and tools.

pub mod health;
pub mod middleware;
pub mod sea_ext;
pub mod serde;
pub mod tracing;
