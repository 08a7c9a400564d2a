//! Statistics API DTOs

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};
use validator::Validate;

use crate::domain::statistics::model::{BucketWidth, PeriodKind, SortOrder};

const QUERY_DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Query of the sequence and summary endpoints. Empty parameters count as absent.
#[serde_as]
#[derive(Deserialize, Debug, Clone, Default, Validate)]
#[serde(default)]
pub struct StatisticsQuery {
    /// Defaults to `last_7_days`.
    #[serde_as(as = "NoneAsEmptyString")]
    pub period_type: Option<PeriodKind>,

    /// `MINUTE`, `HOUR`, `DAY`, `WEEK` or `MONTH`; derived from the span when absent.
    #[serde_as(as = "NoneAsEmptyString")]
    pub step: Option<BucketWidth>,

    /// Local time in the configured offset, required for `period_type=interval`.
    #[serde_as(as = "NoneAsEmptyString")]
    pub interval_begin: Option<QueryDateTime>,

    #[serde_as(as = "NoneAsEmptyString")]
    pub interval_end: Option<QueryDateTime>,

    #[serde_as(as = "NoneAsEmptyString")]
    pub sort_order: Option<SortOrder>,

    /// Zero or negative means unlimited.
    #[serde_as(as = "NoneAsEmptyString")]
    pub limit: Option<i64>,

    #[validate(length(min = 1, max = 64))]
    #[serde_as(as = "NoneAsEmptyString")]
    pub server_id: Option<String>,

    #[validate(length(min = 1, max = 64))]
    #[serde_as(as = "NoneAsEmptyString")]
    pub user_id: Option<String>,
}

/// `YYYY-MM-DD HH:MM:SS` (also accepts a `T` separator, no seconds, or a bare date).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDateTime(pub NaiveDateTime);

impl FromStr for QueryDateTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();

        QUERY_DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
            .map(QueryDateTime)
            .ok_or_else(|| format!("invalid date time '{}', expected YYYY-MM-DD HH:MM:SS", raw))
    }
}

impl fmt::Display for QueryDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(QUERY_DATE_TIME_FORMATS[0]))
    }
}
