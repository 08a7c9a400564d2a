use chrono::{DateTime, Duration, FixedOffset};

use crate::domain::common::model::EventBounds;
use crate::domain::statistics::error::StatisticsError;
use crate::domain::statistics::model::bucket_width::{
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MONTH, SECONDS_PER_YEAR,
};
use crate::domain::statistics::model::{BucketWidth, Period, PeriodKind, ResolvedPeriod};

const FOUR_MONTHS_SECONDS: i64 = 4 * 30 * SECONDS_PER_DAY;
const FOUR_DAYS_SECONDS: i64 = 4 * SECONDS_PER_DAY;
const FOUR_HOURS_SECONDS: i64 = 4 * SECONDS_PER_HOUR;

/// Resolve a period into a concrete `[begin, end)` range.
///
/// `all_time_bounds` is only read for [`PeriodKind::AllTime`]; the caller queries
/// it from storage with the active filters. `step` overrides the width derived
/// from the span.
pub fn resolve_period(
    period: &Period,
    now: DateTime<FixedOffset>,
    all_time_bounds: Option<EventBounds>,
    step: Option<BucketWidth>,
) -> Result<ResolvedPeriod, StatisticsError> {
    let (begin, end) = match period.kind {
        PeriodKind::Interval => interval_range(period)?,
        PeriodKind::AllTime => all_time_range(all_time_bounds, now)?,
        PeriodKind::Today => trailing(now, 0, SECONDS_PER_DAY),
        PeriodKind::DayBefore => trailing(now, SECONDS_PER_DAY, SECONDS_PER_DAY),
        PeriodKind::Last7Days => trailing(now, 0, 7 * SECONDS_PER_DAY),
        PeriodKind::Previous7Days => trailing(now, 7 * SECONDS_PER_DAY, 7 * SECONDS_PER_DAY),
        PeriodKind::DuringMonth => trailing(now, 0, SECONDS_PER_MONTH),
        PeriodKind::DuringPreviousMonth => trailing(now, SECONDS_PER_MONTH, SECONDS_PER_MONTH),
        PeriodKind::DuringYear => trailing(now, 0, SECONDS_PER_YEAR),
        PeriodKind::DuringPreviousYear => trailing(now, SECONDS_PER_YEAR, SECONDS_PER_YEAR),
    };

    let width = step.unwrap_or_else(|| default_width(begin, end));

    Ok(ResolvedPeriod { begin, end, width })
}

/// Width chosen when the request has no `step`.
pub fn default_width(begin: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> BucketWidth {
    let span = (end - begin).num_seconds();

    if span > FOUR_MONTHS_SECONDS {
        BucketWidth::Month
    } else if span > FOUR_DAYS_SECONDS {
        BucketWidth::Day
    } else if span > FOUR_HOURS_SECONDS {
        BucketWidth::Hour
    } else {
        BucketWidth::Minute
    }
}

/// `end = now - shift`, `begin = end - length`.
fn trailing(
    now: DateTime<FixedOffset>,
    shift_seconds: i64,
    length_seconds: i64,
) -> (DateTime<FixedOffset>, DateTime<FixedOffset>) {
    let end = now - Duration::seconds(shift_seconds);
    let begin = end - Duration::seconds(length_seconds);
    (begin, end)
}

fn interval_range(
    period: &Period,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), StatisticsError> {
    let (begin, end) = match (period.explicit_begin, period.explicit_end) {
        (Some(begin), Some(end)) => (begin, end),
        (None, _) => {
            return Err(StatisticsError::InvalidInterval(
                "interval_begin is required for period_type=interval".into(),
            ))
        }
        (_, None) => {
            return Err(StatisticsError::InvalidInterval(
                "interval_end is required for period_type=interval".into(),
            ))
        }
    };

    if begin > end {
        return Err(StatisticsError::InvalidInterval(format!(
            "interval_begin {} is after interval_end {}",
            begin, end
        )));
    }

    Ok((begin, end))
}

/// The range ends one second past the latest event so that event stays inside `[begin, end)`.
fn all_time_range(
    bounds: Option<EventBounds>,
    now: DateTime<FixedOffset>,
) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), StatisticsError> {
    let bounds = bounds.ok_or(StatisticsError::NoData)?;
    let offset = *now.offset();

    let begin = DateTime::from_timestamp(bounds.first, 0)
        .ok_or(StatisticsError::NoData)?
        .with_timezone(&offset);
    let end = DateTime::from_timestamp(bounds.last.max(bounds.first) + 1, 0)
        .ok_or(StatisticsError::NoData)?
        .with_timezone(&offset);

    Ok((begin, end))
}
