//! Revenue and order counts per time bucket
//!
//! Both order-level and item-level variants run through the same aggregation
//! over [`ReportSource`] records.
//!
//! Null policy:
//! - missing order total: counts as zero everywhere
//! - missing timestamp: excluded from every timed bucket, still part of `total`

use chrono::TimeZone;
use dineboard_types::{Order, OrderCountsByTimeRange, OrderItem, RevenueByTimeRange};

use super::buckets::{TimeBucket, TimeBuckets};
use super::priority::ReportSource;

fn revenue_slot(report: &mut RevenueByTimeRange, bucket: TimeBucket) -> &mut f64 {
    match bucket {
        TimeBucket::Today => &mut report.today,
        TimeBucket::Yesterday => &mut report.yesterday,
        TimeBucket::ThisWeek => &mut report.this_week,
        TimeBucket::LastWeek => &mut report.last_week,
        TimeBucket::ThisMonth => &mut report.this_month,
        TimeBucket::LastMonth => &mut report.last_month,
        TimeBucket::ThisYear => &mut report.this_year,
    }
}

fn count_slot(report: &mut OrderCountsByTimeRange, bucket: TimeBucket) -> &mut usize {
    match bucket {
        TimeBucket::Today => &mut report.today,
        TimeBucket::Yesterday => &mut report.yesterday,
        TimeBucket::ThisWeek => &mut report.this_week,
        TimeBucket::LastWeek => &mut report.last_week,
        TimeBucket::ThisMonth => &mut report.this_month,
        TimeBucket::LastMonth => &mut report.last_month,
        TimeBucket::ThisYear => &mut report.this_year,
    }
}

/// Revenue per bucket from either source
pub fn revenue_by_source<Tz: TimeZone>(
    source: ReportSource<'_>,
    buckets: &TimeBuckets<Tz>,
) -> RevenueByTimeRange {
    let mut report = RevenueByTimeRange::default();

    for record in source.records() {
        report.total += record.amount;

        let Some(at) = record.at else {
            continue;
        };
        for bucket in buckets.classify(&at).iter() {
            *revenue_slot(&mut report, bucket) += record.amount;
        }
    }

    report
}

/// Order counts per bucket from either source
///
/// Orders count one each; items count distinct parent order ids.
pub fn order_counts_by_source<Tz: TimeZone>(
    source: ReportSource<'_>,
    buckets: &TimeBuckets<Tz>,
) -> OrderCountsByTimeRange {
    let records = source.records();
    let mut overall = source.tally();
    let mut per_bucket: Vec<_> = TimeBucket::ALL.iter().map(|_| source.tally()).collect();

    for record in &records {
        overall.add(record);

        let Some(at) = record.at else {
            continue;
        };
        for bucket in buckets.classify(&at).iter() {
            per_bucket[bucket as usize].add(record);
        }
    }

    let mut report = OrderCountsByTimeRange {
        total: overall.value(),
        ..Default::default()
    };
    for bucket in TimeBucket::ALL {
        *count_slot(&mut report, bucket) = per_bucket[bucket as usize].value();
    }
    report
}

pub fn revenue_by_time_range<Tz: TimeZone>(
    orders: &[Order],
    buckets: &TimeBuckets<Tz>,
) -> RevenueByTimeRange {
    revenue_by_source(ReportSource::Orders(orders), buckets)
}

/// Item-level revenue: `Σ unit_price × quantity` per bucket
pub fn revenue_by_time_range_from_items<Tz: TimeZone>(
    items: &[OrderItem],
    buckets: &TimeBuckets<Tz>,
) -> RevenueByTimeRange {
    revenue_by_source(ReportSource::Items(items), buckets)
}

pub fn order_counts_by_time_range<Tz: TimeZone>(
    orders: &[Order],
    buckets: &TimeBuckets<Tz>,
) -> OrderCountsByTimeRange {
    order_counts_by_source(ReportSource::Orders(orders), buckets)
}

pub fn order_counts_by_time_range_from_items<Tz: TimeZone>(
    items: &[OrderItem],
    buckets: &TimeBuckets<Tz>,
) -> OrderCountsByTimeRange {
    order_counts_by_source(ReportSource::Items(items), buckets)
}
