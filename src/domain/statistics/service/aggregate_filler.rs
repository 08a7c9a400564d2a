use chrono::FixedOffset;
use tracing::warn;

use crate::domain::statistics::model::{AggregateRow, Bucket, BucketWidth};

/// Fill buckets in place from pre-aggregated rows.
///
/// A bucket covers `[start, next_start)` where `next_start` is the closest later
/// bucket start in the sequence, or `width` past its own start for the latest
/// bucket. Each bucket takes the first row inside its interval; buckets without
/// a row keep `value = 0, count = 0`. Extra rows landing in an already matched
/// bucket are not merged and only reported.
pub fn fill_buckets(
    buckets: &mut [Bucket],
    rows: &[AggregateRow],
    width: BucketWidth,
    offset: FixedOffset,
) {
    let edges = upper_edges(buckets, width, offset);

    for (bucket, upper) in buckets.iter_mut().zip(edges) {
        let lower = bucket.start_unix_time;
        let mut matching = rows
            .iter()
            .filter(|row| row.representative_unix_time >= lower && row.representative_unix_time < upper);

        let Some(row) = matching.next() else {
            bucket.value = 0.0;
            bucket.count = 0;
            continue;
        };

        bucket.value = row.value;
        bucket.count = row.count;

        let shadowed = matching.count();
        if shadowed > 0 {
            warn!(
                bucket = %bucket.label,
                shadowed,
                "Aggregate rows share one bucket; only the first one is charted"
            );
        }
    }
}

fn upper_edges(buckets: &[Bucket], width: BucketWidth, offset: FixedOffset) -> Vec<i64> {
    let mut starts: Vec<i64> = buckets.iter().map(|b| b.start_unix_time).collect();
    starts.sort_unstable();
    starts.dedup();

    buckets
        .iter()
        .map(|bucket| {
            let after = starts.partition_point(|&s| s <= bucket.start_unix_time);
            starts
                .get(after)
                .copied()
                .unwrap_or_else(|| width.advance(bucket.start_unix_time, offset))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::statistics::model::SortOrder;
    use crate::domain::statistics::service::bucket_generator::generate_buckets;
    use chrono::{DateTime, TimeZone};

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        utc().with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn hourly(order: SortOrder) -> Vec<Bucket> {
        generate_buckets(
            at(2024, 2, 22, 0, 0, 0),
            at(2024, 2, 23, 0, 0, 0),
            BucketWidth::Hour,
            order,
            None,
        )
    }

    fn row(t: DateTime<FixedOffset>, value: f64, count: u64) -> AggregateRow {
        AggregateRow {
            representative_unix_time: t.timestamp(),
            value,
            count,
        }
    }

    #[test]
    fn row_lands_in_its_hour() {
        let mut buckets = hourly(SortOrder::Ascending);
        let rows = [row(at(2024, 2, 22, 5, 30, 0), 10.0, 1)];

        fill_buckets(&mut buckets, &rows, BucketWidth::Hour, utc());

        for bucket in &buckets {
            if bucket.label == "2024-02-22 05:00:00" {
                assert_eq!(bucket.value, 10.0);
                assert_eq!(bucket.count, 1);
            } else {
                assert_eq!(bucket.value, 0.0);
                assert_eq!(bucket.count, 0);
            }
        }
    }

    #[test]
    fn upper_edge_belongs_to_the_next_bucket() {
        let mut buckets = hourly(SortOrder::Ascending);
        let rows = [row(at(2024, 2, 22, 6, 0, 0), 4.0, 2)];

        fill_buckets(&mut buckets, &rows, BucketWidth::Hour, utc());

        assert_eq!(buckets[5].count, 0);
        assert_eq!(buckets[6].value, 4.0);
        assert_eq!(buckets[6].count, 2);
    }

    #[test]
    fn last_bucket_ends_one_width_after_its_start() {
        let mut buckets = hourly(SortOrder::Ascending);
        let rows = [
            row(at(2024, 2, 22, 23, 59, 59), 1.0, 1),
            row(at(2024, 2, 23, 0, 0, 0), 99.0, 9),
        ];

        fill_buckets(&mut buckets, &rows, BucketWidth::Hour, utc());

        assert_eq!(buckets[23].value, 1.0);
        assert_eq!(buckets.iter().map(|b| b.count).sum::<u64>(), 1);
    }

    #[test]
    fn first_matching_row_wins_and_rows_are_used_once() {
        let mut buckets = hourly(SortOrder::Ascending);
        let rows = [
            row(at(2024, 2, 22, 3, 10, 0), 7.0, 1),
            row(at(2024, 2, 22, 3, 50, 0), 8.0, 3),
            row(at(2024, 2, 22, 4, 0, 0), 2.5, 1),
        ];

        fill_buckets(&mut buckets, &rows, BucketWidth::Hour, utc());

        assert_eq!(buckets[3].value, 7.0);
        assert_eq!(buckets[3].count, 1);
        assert_eq!(buckets[4].value, 2.5);
        assert_eq!(buckets.iter().filter(|b| b.count > 0).count(), 2);
    }

    #[test]
    fn filling_twice_is_idempotent() {
        let rows = [
            row(at(2024, 2, 22, 1, 0, 0), 3.0, 1),
            row(at(2024, 2, 22, 17, 20, 0), 5.0, 2),
        ];

        let mut once = hourly(SortOrder::Ascending);
        fill_buckets(&mut once, &rows, BucketWidth::Hour, utc());

        let mut twice = once.clone();
        fill_buckets(&mut twice, &rows, BucketWidth::Hour, utc());

        assert_eq!(once, twice);
    }

    #[test]
    fn descending_buckets_use_the_same_intervals() {
        let rows = [row(at(2024, 2, 22, 5, 30, 0), 10.0, 1)];

        let mut asc = hourly(SortOrder::Ascending);
        fill_buckets(&mut asc, &rows, BucketWidth::Hour, utc());

        let mut desc = hourly(SortOrder::Descending);
        fill_buckets(&mut desc, &rows, BucketWidth::Hour, utc());
        desc.reverse();

        assert_eq!(asc, desc);
    }

    #[test]
    fn monthly_last_bucket_spans_a_calendar_month() {
        let mut buckets = generate_buckets(
            at(2024, 1, 1, 0, 0, 0),
            at(2024, 3, 1, 0, 0, 0),
            BucketWidth::Month,
            SortOrder::Ascending,
            None,
        );
        let rows = [row(at(2024, 3, 31, 20, 0, 0), 12.0, 4)];

        fill_buckets(&mut buckets, &rows, BucketWidth::Month, utc());

        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[2].label, "2024-03-01 00:00:00");
        assert_eq!(buckets[2].value, 12.0);
    }
}
