//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use flock_core::config::FlockConfig;
use flock_core::FlockCore;

/// Passed to every axum handler via `State<AppState>`.
///
/// `FlockCore` only holds pooled connection handles, so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<FlockConfig>,
    pub core: FlockCore,
}

impl AppState {
    pub fn new(core: FlockCore) -> Self {
        Self {
            config: Arc::new(core.config.clone()),
            core,
        }
    }
}
