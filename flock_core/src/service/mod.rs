use sea_orm::QuerySelect;
use serde::{Deserialize, Serialize};

pub mod accounts;
pub mod engagement;
pub mod feed;
pub mod notifications;
pub mod posts;
pub mod relationships;

/// Limit/offset window applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: u64,
    pub offset: u64,
}

/// Largest LIMIT/OFFSET SQLite binds; both travel as signed 64-bit integers.
const MAX_SQL_BOUND: u64 = i64::MAX as u64;

impl PageRequest {
    pub fn new(limit: u64, offset: u64) -> Self {
        Self {
            limit: limit.min(MAX_SQL_BOUND),
            offset: offset.min(MAX_SQL_BOUND),
        }
    }

    /// Apply the window to a select, clamped to what the database can bind.
    pub(crate) fn apply<Q: QuerySelect>(self, select: Q) -> Q {
        select
            .limit(self.limit.min(MAX_SQL_BOUND))
            .offset(self.offset.min(MAX_SQL_BOUND))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_clamps_to_sql_bounds() {
        let page = PageRequest::new(u64::MAX, u64::MAX);
        assert_eq!(page.limit, i64::MAX as u64);
        assert_eq!(page.offset, i64::MAX as u64);

        assert_eq!(PageRequest::new(5, 10), PageRequest { limit: 5, offset: 10 });
    }
}
