//! Daily and hourly revenue series for charts
//!
//! Day boundaries are local midnights in the time zone of "now": a timestamp
//! belongs to a day when its local calendar date is that day.
//!
//! Source priority per series: order items first, then (per day) the parent
//! order's timestamp, then plain order totals when there are no items at all.

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Timelike, Utc};
use dineboard_types::{DailyRevenue, HourlyRevenue, Order, OrderItem};
use std::collections::HashMap;

use super::buckets::TimeBuckets;

/// Default length of the daily series
pub const DEFAULT_DAYS: usize = 7;

/// Longest daily series a config may request, ten years
pub const MAX_DAILY_DAYS: usize = 3650;

/// Chart label: month and day without padding, e.g. "3/7"
pub fn day_label(date: NaiveDate) -> String {
    format!("{}/{}", date.month(), date.day())
}

/// `days` consecutive dates ending today, oldest first
fn day_range(today: NaiveDate, days: usize) -> Vec<NaiveDate> {
    (0..days as u64)
        .rev()
        .filter_map(|offset| today.checked_sub_days(Days::new(offset)))
        .collect()
}

fn daily_entry(date: NaiveDate, revenue: f64) -> DailyRevenue {
    DailyRevenue {
        date,
        label: day_label(date),
        revenue,
    }
}

fn order_timestamps(orders: &[Order]) -> HashMap<&str, DateTime<Utc>> {
    orders
        .iter()
        .filter_map(|order| order.created_at.map(|at| (order.id.as_str(), at)))
        .collect()
}

/// Daily revenue from order totals
///
/// Always returns `days` entries, zero-filled when nothing matches.
pub fn daily_revenue<Tz: TimeZone>(
    orders: &[Order],
    days: usize,
    buckets: &TimeBuckets<Tz>,
) -> Vec<DailyRevenue> {
    let dated: Vec<(NaiveDate, f64)> = orders
        .iter()
        .filter_map(|order| {
            order
                .created_at
                .map(|at| (buckets.local_date(&at), order.total_or_zero()))
        })
        .collect();

    day_range(buckets.today(), days)
        .into_iter()
        .map(|date| {
            let revenue: f64 = dated
                .iter()
                .filter(|(day, _)| *day == date)
                .map(|(_, amount)| amount)
                .sum();
            daily_entry(date, revenue)
        })
        .collect()
}

/// Daily revenue from order items
///
/// For each day, items whose own `added_at` falls on that day are summed. When
/// no item has its own timestamp on that day, items are matched by their
/// parent order's creation date instead. With no items at all the order
/// totals are used.
pub fn daily_revenue_from_items<Tz: TimeZone>(
    items: &[OrderItem],
    orders: &[Order],
    days: usize,
    buckets: &TimeBuckets<Tz>,
) -> Vec<DailyRevenue> {
    if items.is_empty() {
        return daily_revenue(orders, days, buckets);
    }

    let parent_created = order_timestamps(orders);

    // (own date, parent order date, amount)
    let dated: Vec<(Option<NaiveDate>, Option<NaiveDate>, f64)> = items
        .iter()
        .map(|item| {
            let own = item.added_at.map(|at| buckets.local_date(&at));
            let parent = item
                .order_id
                .as_deref()
                .and_then(|order_id| parent_created.get(order_id))
                .map(|at| buckets.local_date(at));
            (own, parent, item.line_total())
        })
        .collect();

    day_range(buckets.today(), days)
        .into_iter()
        .map(|date| {
            let own_on_day: Vec<f64> = dated
                .iter()
                .filter(|(own, _, _)| *own == Some(date))
                .map(|(_, _, amount)| *amount)
                .collect();

            let revenue: f64 = if own_on_day.is_empty() {
                dated
                    .iter()
                    .filter(|(_, parent, _)| *parent == Some(date))
                    .map(|(_, _, amount)| amount)
                    .sum()
            } else {
                own_on_day.iter().sum()
            };
            daily_entry(date, revenue)
        })
        .collect()
}

fn empty_hours() -> Vec<HourlyRevenue> {
    (0..24)
        .map(|hour| HourlyRevenue { hour, revenue: 0.0 })
        .collect()
}

/// Revenue per hour of day from order totals, across all days
///
/// Always 24 entries, index `i` is hour `i`.
pub fn hourly_revenue<Tz: TimeZone>(
    orders: &[Order],
    buckets: &TimeBuckets<Tz>,
) -> Vec<HourlyRevenue> {
    let mut hours = empty_hours();
    for order in orders {
        let Some(at) = order.created_at else {
            continue;
        };
        let hour = buckets.localize(&at).hour() as usize;
        hours[hour].revenue += order.total_or_zero();
    }
    hours
}

/// Revenue per hour of day from order items, across all days
///
/// Uses the item's own timestamp, else its parent order's. Falls back to order
/// totals when there are no items. Always 24 entries.
pub fn hourly_revenue_from_items<Tz: TimeZone>(
    items: &[OrderItem],
    orders: &[Order],
    buckets: &TimeBuckets<Tz>,
) -> Vec<HourlyRevenue> {
    if items.is_empty() {
        return hourly_revenue(orders, buckets);
    }

    let parent_created = order_timestamps(orders);
    let mut hours = empty_hours();

    for item in items {
        let at = item.added_at.or_else(|| {
            item.order_id
                .as_deref()
                .and_then(|order_id| parent_created.get(order_id).copied())
        });
        let Some(at) = at else {
            tracing::debug!(item_id = %item.id, "Order item without timestamp, skipping");
            continue;
        };
        let hour = buckets.localize(&at).hour() as usize;
        hours[hour].revenue += item.line_total();
    }
    hours
}
