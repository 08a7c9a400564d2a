use anyhow::Result;
use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use serde_json::Value;
use tracing::{debug, warn};
use validator::Validate;

use crate::api::dto::statistics_dto::{QueryDateTime, StatisticsQuery};
use crate::domain::common::model::EventFilter;
use crate::domain::common::service::StatisticsRowRepository;
use crate::domain::statistics::dto::{
    BillingPointDto, ConnectionPointDto, StatisticsSequenceDto, StatisticsSequenceResponseDto,
    StatisticsSource, StatisticsSummaryDto,
};
use crate::domain::statistics::model::{
    Bucket, BucketWidth, Period, PeriodKind, ResolvedPeriod, SortOrder,
};
use crate::domain::statistics::service::aggregate_filler::fill_buckets;
use crate::domain::statistics::service::bucket_generator::{bucket_count, generate_buckets};
use crate::domain::statistics::service::period_resolver::{default_width, resolve_period};

/// Request-independent knobs of the statistics endpoints.
#[derive(Debug, Clone, Copy)]
pub struct StatisticsSettings {
    /// Zone used to read interval bounds, truncate months and render labels.
    pub utc_offset: FixedOffset,
    /// Upper bound on buckets per sequence; explicit steps beyond it fall back to
    /// the automatic width, anything still beyond it is truncated.
    pub max_buckets: i64,
}

impl Default for StatisticsSettings {
    fn default() -> Self {
        Self {
            utc_offset: Utc.fix(),
            max_buckets: 5_000,
        }
    }
}

struct StatisticsRequest {
    period: Period,
    step: Option<BucketWidth>,
    order: SortOrder,
    limit: Option<i64>,
    filter: EventFilter,
}

impl StatisticsRequest {
    fn from_query(q: StatisticsQuery, offset: FixedOffset) -> Self {
        let local = |d: Option<QueryDateTime>| {
            d.and_then(|d| offset.from_local_datetime(&d.0).single())
        };

        Self {
            period: Period {
                kind: q.period_type.unwrap_or_default(),
                explicit_begin: local(q.interval_begin),
                explicit_end: local(q.interval_end),
            },
            step: q.step,
            order: q.sort_order.unwrap_or_default(),
            limit: q.limit,
            filter: EventFilter {
                server_id: q.server_id,
                user_id: q.user_id,
            },
        }
    }
}

pub async fn get_statistics_sequence(
    repo: &dyn StatisticsRowRepository,
    source: StatisticsSource,
    q: StatisticsQuery,
    settings: &StatisticsSettings,
    now: DateTime<Utc>,
) -> Result<Value> {
    q.validate()?;
    let sequence = build_sequence(repo, source, q, settings, now)?;

    let value = match source {
        StatisticsSource::Billing => {
            serde_json::to_value(StatisticsSequenceResponseDto::<BillingPointDto>::from(sequence))?
        }
        StatisticsSource::Connections => {
            serde_json::to_value(StatisticsSequenceResponseDto::<ConnectionPointDto>::from(sequence))?
        }
    };

    Ok(value)
}

pub async fn get_statistics_summary(
    repo: &dyn StatisticsRowRepository,
    source: StatisticsSource,
    q: StatisticsQuery,
    settings: &StatisticsSettings,
    now: DateTime<Utc>,
) -> Result<Value> {
    q.validate()?;
    let summary = build_summary(repo, source, q, settings, now)?;
    Ok(serde_json::to_value(summary)?)
}

pub fn build_sequence(
    repo: &dyn StatisticsRowRepository,
    source: StatisticsSource,
    q: StatisticsQuery,
    settings: &StatisticsSettings,
    now: DateTime<Utc>,
) -> Result<StatisticsSequenceDto> {
    let offset = settings.utc_offset;
    let request = StatisticsRequest::from_query(q, offset);
    let resolved = resolve(repo, &request, offset, now)?;
    let (width, limit) = guard_width(&resolved, &request, settings.max_buckets);

    let mut buckets = generate_buckets(resolved.begin, resolved.end, width, request.order, limit);

    if let Some((start, end)) = covered_range(&buckets, width, offset) {
        let rows = repo.aggregate_between(&request.filter, start, end, width, offset)?;
        fill_buckets(&mut buckets, &rows, width, offset);
    }

    debug!(
        %source,
        period_type = %request.period.kind,
        %width,
        buckets = buckets.len(),
        "Built statistics sequence"
    );

    Ok(StatisticsSequenceDto {
        source,
        period_type: request.period.kind,
        step: width,
        sort_order: request.order,
        begin: resolved.begin.timestamp(),
        end: resolved.end.timestamp(),
        buckets,
    })
}

pub fn build_summary(
    repo: &dyn StatisticsRowRepository,
    source: StatisticsSource,
    q: StatisticsQuery,
    settings: &StatisticsSettings,
    now: DateTime<Utc>,
) -> Result<StatisticsSummaryDto> {
    let offset = settings.utc_offset;
    let request = StatisticsRequest::from_query(q, offset);
    let resolved = resolve(repo, &request, offset, now)?;

    let rows = repo.aggregate_between(
        &request.filter,
        resolved.begin.with_timezone(&Utc),
        resolved.end.with_timezone(&Utc),
        resolved.width,
        offset,
    )?;

    Ok(StatisticsSummaryDto {
        source,
        period_type: request.period.kind,
        begin: resolved.begin.timestamp(),
        end: resolved.end.timestamp(),
        total_value: rows.iter().map(|r| r.value).sum(),
        total_count: rows.iter().map(|r| r.count).sum(),
    })
}

fn resolve(
    repo: &dyn StatisticsRowRepository,
    request: &StatisticsRequest,
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> Result<ResolvedPeriod> {
    let bounds = if request.period.kind == PeriodKind::AllTime {
        repo.event_bounds(&request.filter)?
    } else {
        None
    };

    Ok(resolve_period(
        &request.period,
        now.with_timezone(&offset),
        bounds,
        request.step,
    )?)
}

/// Soft validation against `max_buckets`, counted after the request's own limit.
///
/// An oversized explicit step falls back to the automatic width; when even that
/// is too fine the sequence is truncated to `max_buckets`.
fn guard_width(
    resolved: &ResolvedPeriod,
    request: &StatisticsRequest,
    max_buckets: i64,
) -> (BucketWidth, Option<i64>) {
    let capped = |width: BucketWidth| {
        let count = bucket_count(resolved.begin, resolved.end, width);
        match request.limit {
            Some(l) if l > 0 => count.min(l),
            _ => count,
        }
    };

    let mut width = resolved.width;
    let mut count = capped(width);

    if request.step.is_some() && count > max_buckets {
        let fallback = default_width(resolved.begin, resolved.end);
        warn!(
            step = %width,
            count,
            max_buckets,
            %fallback,
            "Step yields too many buckets, using automatic width"
        );
        width = fallback;
        count = capped(width);
    }

    if count > max_buckets {
        warn!(%width, count, max_buckets, "Period yields too many buckets, truncating");
        return (width, Some(max_buckets));
    }

    (width, request.limit)
}

/// `[earliest bucket start, end of the latest bucket)`
fn covered_range(
    buckets: &[Bucket],
    width: BucketWidth,
    offset: FixedOffset,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = buckets.iter().map(|b| b.start_unix_time).min()?;
    let last = buckets.iter().map(|b| b.start_unix_time).max()?;

    let start = DateTime::from_timestamp(first, 0)?;
    let end = DateTime::from_timestamp(width.advance(last, offset), 0)?;
    Some((start, end))
}
