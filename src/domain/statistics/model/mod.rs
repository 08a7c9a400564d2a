//! Statistics value types (periods, bucket widths, buckets)

pub mod bucket;
pub mod bucket_width;
pub mod period;

pub use bucket::{AggregateRow, Bucket, BUCKET_LABEL_FORMAT};
pub use bucket_width::{BucketWidth, SortOrder};
pub use period::{Period, PeriodKind, ResolvedPeriod};
