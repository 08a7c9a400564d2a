//! Shared domain types (event filters, event bounds)

use serde::Serialize;

/// Active filters of a statistics query. `None` matches every event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventFilter {
    pub server_id: Option<String>,
    pub user_id: Option<String>,
}

impl EventFilter {
    pub fn matches(&self, server_id: &str, user_id: &str) -> bool {
        let server_ok = self.server_id.as_deref().map_or(true, |s| s == server_id);
        let user_ok = self.user_id.as_deref().map_or(true, |u| u == user_id);
        server_ok && user_ok
    }
}

/// Unix times of the earliest and latest event matching a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventBounds {
    pub first: i64,
    pub last: i64,
}

impl EventBounds {
    pub fn include(self, time: i64) -> Self {
        Self {
            first: self.first.min(time),
            last: self.last.max(time),
        }
    }
}
