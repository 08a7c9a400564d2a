//! Shared domain services (storage seam for statistics queries)

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};

use crate::domain::common::model::{EventBounds, EventFilter};
use crate::domain::statistics::model::{AggregateRow, BucketWidth};

/// Storage side of a statistics query.
pub trait StatisticsRowRepository: Send + Sync {
    /// Events in `[start, end)` grouped by `width` truncation (month starts in
    /// `offset`), ordered by representative time.
    fn aggregate_between(
        &self,
        filter: &EventFilter,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        width: BucketWidth,
        offset: FixedOffset,
    ) -> Result<Vec<AggregateRow>>;

    /// Earliest and latest matching event, `None` when nothing matches.
    fn event_bounds(&self, filter: &EventFilter) -> Result<Option<EventBounds>>;
}
