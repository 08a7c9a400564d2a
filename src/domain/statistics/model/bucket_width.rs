use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;
pub const SECONDS_PER_WEEK: i64 = 7 * SECONDS_PER_DAY;
/// Nominal month: 365/12 days.
pub const SECONDS_PER_MONTH: i64 = 365 * SECONDS_PER_DAY / 12;
pub const SECONDS_PER_YEAR: i64 = 365 * SECONDS_PER_DAY;

/// Width of one chart bucket (`step` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BucketWidth {
    Minute,
    Hour,
    Day,
    Week,
    Month,
}

impl BucketWidth {
    pub fn seconds(&self) -> i64 {
        match self {
            BucketWidth::Minute => SECONDS_PER_MINUTE,
            BucketWidth::Hour => SECONDS_PER_HOUR,
            BucketWidth::Day => SECONDS_PER_DAY,
            BucketWidth::Week => SECONDS_PER_WEEK,
            BucketWidth::Month => SECONDS_PER_MONTH,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BucketWidth::Minute => "MINUTE",
            BucketWidth::Hour => "HOUR",
            BucketWidth::Day => "DAY",
            BucketWidth::Week => "WEEK",
            BucketWidth::Month => "MONTH",
        }
    }

    /// Start of the bucket containing `unix_time`.
    ///
    /// Fixed widths snap to epoch-aligned multiples; `Month` snaps to the first
    /// of the month in `offset`.
    pub fn truncate(&self, unix_time: i64, offset: FixedOffset) -> i64 {
        match self {
            BucketWidth::Month => local_naive(unix_time, offset)
                .and_then(|naive| month_start(&naive))
                .and_then(|start| to_unix(start, offset))
                .unwrap_or(unix_time),
            _ => {
                let w = self.seconds();
                unix_time.div_euclid(w) * w
            }
        }
    }

    /// Start of the bucket following the one that starts at `unix_time`.
    pub fn advance(&self, unix_time: i64, offset: FixedOffset) -> i64 {
        match self {
            BucketWidth::Month => local_naive(unix_time, offset)
                .and_then(|naive| naive.checked_add_months(Months::new(1)))
                .and_then(|next| to_unix(next, offset))
                .unwrap_or(unix_time + SECONDS_PER_MONTH),
            _ => unix_time + self.seconds(),
        }
    }
}

impl fmt::Display for BucketWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketWidth {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "MINUTE" => Ok(BucketWidth::Minute),
            "HOUR" => Ok(BucketWidth::Hour),
            "DAY" => Ok(BucketWidth::Day),
            "WEEK" => Ok(BucketWidth::Week),
            "MONTH" => Ok(BucketWidth::Month),
            other => Err(format!("unknown step '{}'", other)),
        }
    }
}

/// Emission order of generated buckets (`sort_order` query parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order '{}'", other)),
        }
    }
}

pub(crate) fn local_naive(unix_time: i64, offset: FixedOffset) -> Option<NaiveDateTime> {
    DateTime::from_timestamp(unix_time, 0).map(|dt| dt.with_timezone(&offset).naive_local())
}

pub(crate) fn month_start(naive: &NaiveDateTime) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(naive.year(), naive.month(), 1)?.and_hms_opt(0, 0, 0)
}

pub(crate) fn to_unix(naive: NaiveDateTime, offset: FixedOffset) -> Option<i64> {
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.timestamp())
}
