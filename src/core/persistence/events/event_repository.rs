use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Utc};
use tracing::error;

use crate::core::persistence::events::event_entity_trait::StatisticsEventEntity;
use crate::core::persistence::events::event_fs_adapter::EventFsAdapter;
use crate::domain::common::model::{EventBounds, EventFilter};
use crate::domain::common::service::StatisticsRowRepository;
use crate::domain::statistics::model::{AggregateRow, BucketWidth};

pub struct EventRepository<T> {
    adapter: EventFsAdapter<T>,
}

impl<T: StatisticsEventEntity> EventRepository<T> {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            adapter: EventFsAdapter::new(data_dir),
        }
    }

    pub fn append(&self, event: &T) -> Result<()> {
        self.adapter.append_row(event).map_err(|err| {
            error!(error = %err, kind = T::KIND, "Failed to append event");
            err
        })
    }

    pub fn get_row_between(
        &self,
        filter: &EventFilter,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<T>> {
        self.adapter.get_row_between(filter, start, end).map_err(|err| {
            error!(error = %err, kind = T::KIND, "Failed to read events");
            err
        })
    }
}

impl<T: StatisticsEventEntity> StatisticsRowRepository for EventRepository<T> {
    fn aggregate_between(
        &self,
        filter: &EventFilter,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        width: BucketWidth,
        offset: FixedOffset,
    ) -> Result<Vec<AggregateRow>> {
        self.adapter
            .aggregate_between(filter, start, end, width, offset)
            .map_err(|err| {
                error!(error = %err, kind = T::KIND, "Failed to aggregate events");
                err
            })
    }

    fn event_bounds(&self, filter: &EventFilter) -> Result<Option<EventBounds>> {
        self.adapter.event_bounds(filter).map_err(|err| {
            error!(error = %err, kind = T::KIND, "Failed to read event bounds");
            err
        })
    }
}
