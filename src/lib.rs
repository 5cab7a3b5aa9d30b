// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod digest;
pub mod forward;
pub mod ingest;
pub mod keywords;

// ---- Re-exports for stable public API ----
// Convenient access to the router: `ai_curator::api::router` or `ai_curator::router`
pub use crate::api::{router, AppState};
pub use crate::ingest::types::{Item, Source};
