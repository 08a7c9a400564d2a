use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::bucket_width::BucketWidth;

/// Named statistics period, as accepted in the `period_type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    Interval,
    Today,
    DayBefore,
    #[default]
    #[serde(rename = "last_7_days")]
    Last7Days,
    #[serde(rename = "previous_7_days")]
    Previous7Days,
    DuringMonth,
    DuringPreviousMonth,
    DuringYear,
    DuringPreviousYear,
    AllTime,
}

impl PeriodKind {
    pub const ALL: [PeriodKind; 10] = [
        PeriodKind::Interval,
        PeriodKind::Today,
        PeriodKind::DayBefore,
        PeriodKind::Last7Days,
        PeriodKind::Previous7Days,
        PeriodKind::DuringMonth,
        PeriodKind::DuringPreviousMonth,
        PeriodKind::DuringYear,
        PeriodKind::DuringPreviousYear,
        PeriodKind::AllTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Interval => "interval",
            PeriodKind::Today => "today",
            PeriodKind::DayBefore => "day_before",
            PeriodKind::Last7Days => "last_7_days",
            PeriodKind::Previous7Days => "previous_7_days",
            PeriodKind::DuringMonth => "during_month",
            PeriodKind::DuringPreviousMonth => "during_previous_month",
            PeriodKind::DuringYear => "during_year",
            PeriodKind::DuringPreviousYear => "during_previous_year",
            PeriodKind::AllTime => "all_time",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        PeriodKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unknown period type '{}'", needle))
    }
}

/// A period selection before resolution.
///
/// `explicit_begin`/`explicit_end` are only consulted for [`PeriodKind::Interval`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Period {
    pub kind: PeriodKind,
    pub explicit_begin: Option<DateTime<FixedOffset>>,
    pub explicit_end: Option<DateTime<FixedOffset>>,
}

impl Period {
    pub fn named(kind: PeriodKind) -> Self {
        Self {
            kind,
            explicit_begin: None,
            explicit_end: None,
        }
    }

    pub fn interval(begin: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self {
            kind: PeriodKind::Interval,
            explicit_begin: Some(begin),
            explicit_end: Some(end),
        }
    }
}

/// Concrete `[begin, end)` range plus the bucket width to chart it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub begin: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub width: BucketWidth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_kind_parses_query_names() {
        assert_eq!("last_7_days".parse::<PeriodKind>().unwrap(), PeriodKind::Last7Days);
        assert_eq!("ALL_TIME".parse::<PeriodKind>().unwrap(), PeriodKind::AllTime);
        assert_eq!(
            " during_previous_month ".parse::<PeriodKind>().unwrap(),
            PeriodKind::DuringPreviousMonth
        );
        assert!("fortnight".parse::<PeriodKind>().is_err());
    }

    #[test]
    fn period_kind_serde_matches_display() {
        for kind in PeriodKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json.as_str(), Some(kind.as_str()));
        }
    }
}
