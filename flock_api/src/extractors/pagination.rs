use serde::Deserialize;

use flock_core::config::FlockConfig;
use flock_core::service::PageRequest;

/// `?limit=&offset=` query parameters.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl PaginationParams {
    /// Fill in the configured default and clamp to the configured maximum.
    pub fn into_page_request(self, config: &FlockConfig) -> PageRequest {
        let limit = self
            .limit
            .unwrap_or(config.page_size)
            .clamp(1, config.max_page_size.max(1));

        PageRequest::new(limit, self.offset.unwrap_or(0))
    }
}
