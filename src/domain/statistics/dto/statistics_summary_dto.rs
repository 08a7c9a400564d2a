use serde::Serialize;

use crate::domain::statistics::dto::statistics_source::StatisticsSource;
use crate::domain::statistics::model::PeriodKind;

/// Totals of one event stream over a resolved period.
#[derive(Debug, Clone, Serialize)]
pub struct StatisticsSummaryDto {
    pub source: StatisticsSource,
    pub period_type: PeriodKind,
    pub begin: i64,
    pub end: i64,
    pub total_value: f64,
    pub total_count: u64,
}
