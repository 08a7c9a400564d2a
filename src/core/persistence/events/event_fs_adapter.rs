use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Datelike, Duration, FixedOffset, Utc};
use tracing::{debug, warn};

use crate::core::persistence::events::event_entity_trait::StatisticsEventEntity;
use crate::core::persistence::storage_path::{event_file_year, event_year_file_path, events_dir};
use crate::domain::common::model::{EventBounds, EventFilter};
use crate::domain::statistics::model::{AggregateRow, BucketWidth};

/// Adapter for yearly event files under `{data_dir}/events/{kind}/{YYYY}.rce`.
#[derive(Debug)]
pub struct EventFsAdapter<T> {
    dir: PathBuf,
    _entity: PhantomData<fn() -> T>,
}

impl<T: StatisticsEventEntity> EventFsAdapter<T> {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            dir: events_dir(data_dir, T::KIND),
            _entity: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn append_row(&self, event: &T) -> Result<()> {
        for (field, id) in [("server_id", event.server_id()), ("user_id", event.user_id())] {
            if id.contains(['|', '\n', '\r']) {
                bail!("{} '{}' must not contain '|' or line breaks", field, id.escape_debug());
            }
        }

        let path = event_year_file_path(&self.dir, event.time().year());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut writer = BufWriter::new(file);

        writer.write_all(event.to_line().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Matching events in `[start, end)`, ordered by time.
    pub fn get_row_between(
        &self,
        filter: &EventFilter,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<T>> {
        if start >= end {
            return Ok(Vec::new());
        }

        let last_year = (end - Duration::seconds(1)).year();
        let mut rows = Vec::new();

        for year in start.year()..=last_year {
            let path = event_year_file_path(&self.dir, year);
            if !path.exists() {
                continue;
            }

            rows.extend(
                Self::read_file(&path)?
                    .into_iter()
                    .filter(|e| e.time() >= start && e.time() < end)
                    .filter(|e| filter.matches(e.server_id(), e.user_id())),
            );
        }

        rows.sort_by_key(|e| e.time());
        Ok(rows)
    }

    /// Matching events in `[start, end)` grouped by the bucket they truncate to.
    ///
    /// The representative time of a group is its bucket start.
    pub fn aggregate_between(
        &self,
        filter: &EventFilter,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        width: BucketWidth,
        offset: FixedOffset,
    ) -> Result<Vec<AggregateRow>> {
        let mut groups: BTreeMap<i64, (f64, u64)> = BTreeMap::new();

        for event in self.get_row_between(filter, start, end)? {
            let key = width.truncate(event.time().timestamp(), offset);
            let entry = groups.entry(key).or_insert((0.0, 0));
            entry.0 += event.metric_value();
            entry.1 += 1;
        }

        debug!(kind = T::KIND, groups = groups.len(), %width, "Aggregated events");

        Ok(groups
            .into_iter()
            .map(|(time, (value, count))| AggregateRow {
                representative_unix_time: time,
                value,
                count,
            })
            .collect())
    }

    pub fn event_bounds(&self, filter: &EventFilter) -> Result<Option<EventBounds>> {
        let mut bounds: Option<EventBounds> = None;

        for path in self.year_files()? {
            for event in Self::read_file(&path)? {
                if !filter.matches(event.server_id(), event.user_id()) {
                    continue;
                }
                let t = event.time().timestamp();
                bounds = Some(match bounds {
                    Some(b) => b.include(t),
                    None => EventBounds { first: t, last: t },
                });
            }
        }

        Ok(bounds)
    }

    fn year_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut files: Vec<(i32, PathBuf)> = fs::read_dir(&self.dir)
            .with_context(|| format!("Failed to list {}", self.dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter_map(|path| event_file_year(&path).map(|year| (year, path)))
            .collect();

        files.sort_by_key(|(year, _)| *year);
        Ok(files.into_iter().map(|(_, path)| path).collect())
    }

    fn read_file(path: &Path) -> Result<Vec<T>> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
        let reader = BufReader::new(file);
        let mut rows = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match T::parse_line(&line) {
                Some(event) => rows.push(event),
                None => warn!(path = %path.display(), line = idx + 1, "Skipping malformed event line"),
            }
        }

        Ok(rows)
    }
}
