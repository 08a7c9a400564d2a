//! System API DTOs

use serde::{Deserialize, Serialize};

/// Paging of `/system/logs/{date}`; the cursor is a line offset.
#[derive(Deserialize, Debug, Default)]
pub struct LogQuery {
    pub cursor: Option<usize>,
    pub limit: Option<usize>,
}

#[derive(Serialize, Debug)]
pub struct PaginatedLogResponse {
    pub date: String,
    pub lines: Vec<String>,
    /// `None` once the last line has been served.
    pub next_cursor: Option<usize>,
}
