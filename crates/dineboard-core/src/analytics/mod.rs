//! Sales analytics engine
//!
//! Turns raw orders and order items into business reports: revenue and order
//! counts per period, food and category rankings, daily and hourly series,
//! average order value and status distribution.
//!
//! Every function here is pure and total: inputs are borrowed, never mutated,
//! and any well-typed input (including empty collections) yields a report.
//! "Now" is injected through [`TimeBuckets`] instead of read from a clock.

use chrono::{DateTime, TimeZone, Utc};
use dineboard_types::{
    CategoryPerformance, DailyRevenue, Food, FoodCategory, FoodPerformance, HourlyRevenue, Order,
    OrderCountsByTimeRange, OrderItem, OrderStatusDistribution, RevenueByTimeRange,
};
use serde::Serialize;

use crate::config::ReportConfig;

pub mod buckets;
pub mod insights;
pub mod performance;
pub mod priority;
pub mod revenue;
pub mod summary;
pub mod timeseries;

#[cfg(test)]
mod tests;

pub use buckets::{week_of_year, BucketMembership, TimeBucket, TimeBuckets, WeekStart};
pub use insights::generate_insights;
pub use performance::{category_performance, top_performing_foods, DEFAULT_TOP_FOODS};
pub use priority::{ReportSource, ReportSourceKind};
pub use revenue::{
    order_counts_by_source, order_counts_by_time_range, order_counts_by_time_range_from_items,
    revenue_by_source, revenue_by_time_range, revenue_by_time_range_from_items,
};
pub use summary::{average_order_value, average_order_value_from_items, order_status_distribution};
pub use timeseries::{
    daily_revenue, daily_revenue_from_items, day_label, hourly_revenue,
    hourly_revenue_from_items, DEFAULT_DAYS, MAX_DAILY_DAYS,
};

/// Input collections for one report run
///
/// Fetched right before computing and dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub foods: Vec<Food>,
    pub categories: Vec<FoodCategory>,
}

impl Dataset {
    /// No orders and no order items (catalog data alone yields no sales)
    pub fn has_no_sales(&self) -> bool {
        self.orders.is_empty() && self.order_items.is_empty()
    }
}

/// Which collection each metric family was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSources {
    /// Revenue, order counts, average order value
    pub totals: ReportSourceKind,
    /// Daily and hourly series
    pub time_series: ReportSourceKind,
}

/// Complete report bundle
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsData {
    pub revenue: RevenueByTimeRange,
    pub order_counts: OrderCountsByTimeRange,
    pub top_foods: Vec<FoodPerformance>,
    pub categories: Vec<CategoryPerformance>,
    pub daily: Vec<DailyRevenue>,
    pub hourly: Vec<HourlyRevenue>,
    pub average_order_value: f64,
    pub status: OrderStatusDistribution,
    /// Sum of every order item's line total
    pub item_revenue: f64,
    pub sources: ReportSources,
    /// Instant the buckets were pinned to
    pub computed_at: DateTime<Utc>,
}

impl AnalyticsData {
    /// Compute every report from one dataset
    ///
    /// Revenue, counts and average use orders when present and fall back to
    /// items. Daily and hourly series prefer items (they carry per-line
    /// timestamps) and fall back to orders.
    pub fn compute<Tz: TimeZone>(
        data: &Dataset,
        config: &ReportConfig,
        now: DateTime<Tz>,
    ) -> Self {
        let buckets = TimeBuckets::new(now, config.week_start);
        let source = ReportSource::select(&data.orders, &data.order_items);

        let time_series = if !data.order_items.is_empty() {
            ReportSourceKind::Items
        } else if !data.orders.is_empty() {
            ReportSourceKind::Orders
        } else {
            ReportSourceKind::Empty
        };

        tracing::debug!(
            orders = data.orders.len(),
            order_items = data.order_items.len(),
            totals_source = ?source.kind(),
            time_series_source = ?time_series,
            "Computing analytics"
        );

        Self {
            revenue: revenue_by_source(source, &buckets),
            order_counts: order_counts_by_source(source, &buckets),
            top_foods: top_performing_foods(
                &data.order_items,
                &data.foods,
                config.top_foods_limit,
            ),
            categories: category_performance(
                &data.order_items,
                &data.categories,
                config.category_limit,
            ),
            daily: daily_revenue_from_items(
                &data.order_items,
                &data.orders,
                config.daily_days,
                &buckets,
            ),
            hourly: hourly_revenue_from_items(&data.order_items, &data.orders, &buckets),
            average_order_value: average_order_value(&data.orders, &data.order_items),
            status: order_status_distribution(&data.orders),
            item_revenue: data.order_items.iter().map(OrderItem::line_total).sum(),
            sources: ReportSources {
                totals: source.kind(),
                time_series,
            },
            computed_at: buckets.now().with_timezone(&Utc),
        }
    }

    /// Rule-based insights for this bundle
    pub fn insights(&self) -> Vec<String> {
        generate_insights(self)
    }
}
