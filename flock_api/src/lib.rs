//! HTTP API for Flock, built on axum.
//!
//! Every handler is a thin adapter: extract the caller and the request,
//! call one `flock_core` service, map the result to JSON.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
