//! Route modules, one per resource.

pub mod appointments;
pub mod auth;
pub mod health;
pub mod notifications;
pub mod pets;
pub mod subscriptions;
pub mod system;

use serde::Deserialize;

/// Common `?limit=&offset=` query parameters for listings.
#[derive(Debug, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl Pagination {
    /// Resolve to (limit, offset) clamped to the configured maximum.
    pub fn resolve(&self) -> (i64, i64) {
        let limits = &pawtrack_common::config::get().limits;
        let limit = self
            .limit
            .unwrap_or(limits.default_page_size)
            .min(limits.max_page_size) as i64;
        let offset = self.offset.unwrap_or(0) as i64;
        (limit, offset)
    }
}
