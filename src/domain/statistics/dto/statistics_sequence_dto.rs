use serde::Serialize;

use crate::domain::statistics::dto::statistics_source::StatisticsSource;
use crate::domain::statistics::model::{Bucket, BucketWidth, PeriodKind, SortOrder};

/// Filled bucket series for one request.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsSequenceDto {
    pub source: StatisticsSource,
    pub period_type: PeriodKind,
    pub step: BucketWidth,
    pub sort_order: SortOrder,
    pub begin: i64,
    pub end: i64,
    pub buckets: Vec<Bucket>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BillingPointDto {
    pub date_time: String,
    pub unix_time: i64,
    pub value: f64,
    pub transactions_total: u64,
}

impl From<Bucket> for BillingPointDto {
    fn from(bucket: Bucket) -> Self {
        Self {
            date_time: bucket.label,
            unix_time: bucket.start_unix_time,
            value: bucket.value,
            transactions_total: bucket.count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionPointDto {
    pub date_time: String,
    pub unix_time: i64,
    pub value: f64,
    pub connections: u64,
}

impl From<Bucket> for ConnectionPointDto {
    fn from(bucket: Bucket) -> Self {
        Self {
            date_time: bucket.label,
            unix_time: bucket.start_unix_time,
            value: bucket.value,
            connections: bucket.count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatisticsSequenceResponseDto<P> {
    pub source: StatisticsSource,
    pub period_type: PeriodKind,
    pub step: BucketWidth,
    pub sort_order: SortOrder,
    pub begin: i64,
    pub end: i64,
    pub total_items: usize,
    pub items: Vec<P>,
}

impl<P: From<Bucket>> From<StatisticsSequenceDto> for StatisticsSequenceResponseDto<P> {
    fn from(seq: StatisticsSequenceDto) -> Self {
        let items: Vec<P> = seq.buckets.into_iter().map(P::from).collect();
        Self {
            source: seq.source,
            period_type: seq.period_type,
            step: seq.step,
            sort_order: seq.sort_order,
            begin: seq.begin,
            end: seq.end,
            total_items: items.len(),
            items,
        }
    }
}
