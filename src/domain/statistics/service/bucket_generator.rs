use chrono::{DateTime, Datelike, FixedOffset, Months};

use crate::domain::statistics::model::bucket_width::{month_start, to_unix};
use crate::domain::statistics::model::{Bucket, BucketWidth, SortOrder};

/// Build the empty bucket sequence covering `[begin, end)`.
///
/// Fixed widths snap `begin` down and `end` up to width multiples. `Month` walks
/// calendar months between the first-of-month of `begin` and of `end`, both
/// included. A positive `limit` stops generation once that many buckets exist.
/// Labels are rendered in `begin`'s offset. Descending fixed-width starts are
/// `stop - (i + 1) * width`, the ascending starts reversed, so none lies at `end`.
pub fn generate_buckets(
    begin: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    width: BucketWidth,
    order: SortOrder,
    limit: Option<i64>,
) -> Vec<Bucket> {
    let offset = *begin.offset();
    let cap = effective_limit(limit);

    let starts: Vec<i64> = match width {
        BucketWidth::Month => month_starts(begin, end, order, cap),
        _ => fixed_starts(begin.timestamp(), end.timestamp(), width.seconds(), order, cap),
    };

    starts
        .into_iter()
        .map(|start| Bucket::empty(start, offset))
        .collect()
}

/// Number of buckets [`generate_buckets`] would emit without a limit.
pub fn bucket_count(begin: DateTime<FixedOffset>, end: DateTime<FixedOffset>, width: BucketWidth) -> i64 {
    match width {
        BucketWidth::Month => month_span(begin, end).map(|m| m as i64 + 1).unwrap_or(0),
        _ => {
            let (start, stop) = snap(begin.timestamp(), end.timestamp(), width.seconds());
            (stop - start) / width.seconds()
        }
    }
}

fn effective_limit(limit: Option<i64>) -> usize {
    match limit {
        Some(l) if l > 0 => usize::try_from(l).unwrap_or(usize::MAX),
        _ => usize::MAX,
    }
}

fn snap(begin: i64, end: i64, w: i64) -> (i64, i64) {
    let start = begin.div_euclid(w) * w;
    let stop = if end.rem_euclid(w) == 0 {
        end
    } else {
        end.div_euclid(w) * w + w
    };
    (start, stop.max(start))
}

fn fixed_starts(begin: i64, end: i64, w: i64, order: SortOrder, cap: usize) -> Vec<i64> {
    let (start, stop) = snap(begin, end, w);
    let count = (stop - start) / w;

    (0..count)
        .map(|i| match order {
            SortOrder::Ascending => start + i * w,
            SortOrder::Descending => stop - (i + 1) * w,
        })
        .take(cap)
        .collect()
}

/// Whole calendar months from `begin`'s month to `end`'s month.
fn month_span(begin: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Option<u32> {
    let first = begin.naive_local();
    let last = end.naive_local();
    let months = (last.year() - first.year()) * 12 + last.month() as i32 - first.month() as i32;
    u32::try_from(months).ok()
}

fn month_starts(
    begin: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
    order: SortOrder,
    cap: usize,
) -> Vec<i64> {
    let offset = *begin.offset();
    let (Some(first), Some(last), Some(span)) = (
        month_start(&begin.naive_local()),
        month_start(&end.naive_local()),
        month_span(begin, end),
    ) else {
        return Vec::new();
    };

    (0..=span)
        .filter_map(|i| match order {
            SortOrder::Ascending => first.checked_add_months(Months::new(i)),
            SortOrder::Descending => last.checked_sub_months(Months::new(i)),
        })
        .filter_map(|naive| to_unix(naive, offset))
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<FixedOffset> {
        utc().with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn hourly_interval_yields_24_labelled_buckets() {
        let buckets = generate_buckets(
            at(2024, 2, 22, 0, 0, 0),
            at(2024, 2, 23, 0, 0, 0),
            BucketWidth::Hour,
            SortOrder::Ascending,
            None,
        );

        assert_eq!(buckets.len(), 24);
        assert_eq!(buckets[0].label, "2024-02-22 00:00:00");
        assert_eq!(buckets[5].label, "2024-02-22 05:00:00");
        assert_eq!(buckets[23].label, "2024-02-22 23:00:00");
        assert!(buckets.iter().all(|b| b.value == 0.0 && b.count == 0));
    }

    #[test]
    fn fixed_width_buckets_are_evenly_spaced() {
        let begin = at(2024, 3, 3, 7, 13, 42);
        let end = at(2024, 3, 9, 1, 2, 3);

        for width in [BucketWidth::Minute, BucketWidth::Hour, BucketWidth::Day, BucketWidth::Week] {
            let asc = generate_buckets(begin, end, width, SortOrder::Ascending, None);
            let desc = generate_buckets(begin, end, width, SortOrder::Descending, None);

            assert!(!asc.is_empty());
            assert!(asc
                .windows(2)
                .all(|w| w[1].start_unix_time - w[0].start_unix_time == width.seconds()));
            assert!(desc
                .windows(2)
                .all(|w| w[0].start_unix_time - w[1].start_unix_time == width.seconds()));

            let mut reversed = desc.clone();
            reversed.reverse();
            assert_eq!(asc, reversed, "{width}");

            assert!(asc[0].start_unix_time <= begin.timestamp());
            let last = asc.last().unwrap().start_unix_time;
            assert!(last < end.timestamp() && last + width.seconds() >= end.timestamp());
        }
    }

    #[test]
    fn last_7_days_with_unaligned_now_snaps_to_eight_days() {
        let end = at(2024, 2, 22, 13, 45, 0);
        let begin = end - chrono::Duration::days(7);
        let buckets = generate_buckets(begin, end, BucketWidth::Day, SortOrder::Ascending, None);

        assert_eq!(buckets.len(), 8);
        assert_eq!(buckets[0].label, "2024-02-15 00:00:00");
        assert_eq!(buckets[7].label, "2024-02-22 00:00:00");
        assert_eq!(bucket_count(begin, end, BucketWidth::Day), 8);
    }

    #[test]
    fn last_7_days_with_aligned_now_is_seven_days() {
        let end = at(2024, 2, 22, 0, 0, 0);
        let begin = end - chrono::Duration::days(7);
        let buckets = generate_buckets(begin, end, BucketWidth::Day, SortOrder::Ascending, None);
        assert_eq!(buckets.len(), 7);
    }

    #[test]
    fn limit_caps_generation_from_the_emission_start() {
        let begin = at(2024, 2, 22, 0, 0, 0);
        let end = at(2024, 2, 23, 0, 0, 0);

        let asc = generate_buckets(begin, end, BucketWidth::Hour, SortOrder::Ascending, Some(3));
        assert_eq!(asc.len(), 3);
        assert_eq!(asc[0].label, "2024-02-22 00:00:00");

        let desc = generate_buckets(begin, end, BucketWidth::Hour, SortOrder::Descending, Some(2));
        assert_eq!(desc.len(), 2);
        assert_eq!(desc[0].label, "2024-02-22 23:00:00");
        assert_eq!(desc[1].label, "2024-02-22 22:00:00");

        let unlimited = generate_buckets(begin, end, BucketWidth::Hour, SortOrder::Ascending, Some(0));
        assert_eq!(unlimited.len(), 24);
        let negative = generate_buckets(begin, end, BucketWidth::Hour, SortOrder::Ascending, Some(-5));
        assert_eq!(negative.len(), 24);
    }

    #[test]
    fn monthly_buckets_walk_calendar_months() {
        let begin = at(2024, 1, 1, 0, 0, 0);
        let end = at(2024, 4, 1, 0, 0, 0);

        let asc = generate_buckets(begin, end, BucketWidth::Month, SortOrder::Ascending, None);
        let labels: Vec<_> = asc.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "2024-01-01 00:00:00",
                "2024-02-01 00:00:00",
                "2024-03-01 00:00:00",
                "2024-04-01 00:00:00",
            ]
        );

        let mut desc = generate_buckets(begin, end, BucketWidth::Month, SortOrder::Descending, None);
        assert_eq!(desc[0].label, "2024-04-01 00:00:00");
        desc.reverse();
        assert_eq!(asc, desc);
        assert_eq!(bucket_count(begin, end, BucketWidth::Month), 4);
    }

    #[test]
    fn monthly_buckets_truncate_mid_month_bounds() {
        let begin = at(2023, 11, 17, 9, 0, 0);
        let end = at(2024, 2, 3, 0, 0, 0);

        let buckets = generate_buckets(begin, end, BucketWidth::Month, SortOrder::Ascending, Some(2));
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].label, "2023-11-01 00:00:00");
        assert_eq!(buckets[1].label, "2023-12-01 00:00:00");
        assert_eq!(bucket_count(begin, end, BucketWidth::Month), 4);
    }

    #[test]
    fn labels_follow_the_offset_of_the_range() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let begin = plus_two.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let end = plus_two.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();

        let buckets = generate_buckets(begin, end, BucketWidth::Month, SortOrder::Ascending, None);
        assert_eq!(buckets.len(), 3);
        assert_eq!(buckets[0].label, "2024-03-01 00:00:00");
        assert_eq!(buckets[0].start_unix_time, begin.timestamp());
    }

    #[test]
    fn empty_range_on_a_boundary_has_no_buckets() {
        let t = at(2024, 2, 22, 0, 0, 0);
        assert!(generate_buckets(t, t, BucketWidth::Hour, SortOrder::Ascending, None).is_empty());
    }
}
