use chrono::{DateTime, FixedOffset};
use serde::Serialize;

pub const BUCKET_LABEL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One time bucket of a chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub start_unix_time: i64,
    pub label: String,
    pub value: f64,
    pub count: u64,
}

impl Bucket {
    pub fn empty(start_unix_time: i64, offset: FixedOffset) -> Self {
        let label = DateTime::from_timestamp(start_unix_time, 0)
            .map(|dt| dt.with_timezone(&offset).format(BUCKET_LABEL_FORMAT).to_string())
            .unwrap_or_default();

        Self {
            start_unix_time,
            label,
            value: 0.0,
            count: 0,
        }
    }
}

/// Pre-aggregated storage row: metric sum and event count of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateRow {
    pub representative_unix_time: i64,
    pub value: f64,
    pub count: u64,
}
