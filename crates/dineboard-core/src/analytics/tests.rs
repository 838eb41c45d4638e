//! Unit tests for the analytics bundle and cross-report properties

use super::*;
use chrono::{Duration, FixedOffset, TimeZone, Utc};

/// Friday 2026-10-16 18:00 UTC
fn pinned_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap()
}

fn buckets() -> TimeBuckets<Utc> {
    TimeBuckets::new(pinned_now(), WeekStart::Sunday)
}

fn order(id: &str, total: Option<f64>, status: i32, days_ago: i64) -> Order {
    Order {
        id: id.to_string(),
        table_id: Some("t1".to_string()),
        total,
        status: Some(status),
        created_at: Some(pinned_now() - Duration::days(days_ago)),
    }
}

fn line(order_id: &str, food_id: &str, price: f64, quantity: u32, days_ago: i64) -> OrderItem {
    OrderItem {
        id: format!("{}-{}", order_id, food_id),
        order_id: Some(order_id.to_string()),
        food_id: Some(food_id.to_string()),
        food_name: Some(food_id.to_uppercase()),
        unit_price: Some(price),
        quantity,
        added_at: Some(pinned_now() - Duration::days(days_ago)),
        ..Default::default()
    }
}

/// Generate a dataset spread over `days` days
fn generate_dataset(count: usize, days: usize) -> Dataset {
    let mut data = Dataset::default();
    for i in 0..count {
        let days_ago = (i % days) as i64;
        let order_id = format!("order-{}", i);
        let food_id = format!("f{}", i % 4);
        let price = 5.0 + (i % 4) as f64;

        data.order_items.push(line(&order_id, &food_id, price, 2, days_ago));
        data.orders.push(order(&order_id, Some(price * 2.0), (i % 3) as i32, days_ago));
    }
    data.categories.push(FoodCategory {
        id: "c-all".to_string(),
        name: "All".to_string(),
        food_ids: (0..4).map(|i| format!("f{}", i)).collect(),
    });
    data
}

// ============================================================================
// Worked example: a single item, no orders
// ============================================================================

#[test]
fn test_single_item_without_orders() {
    let added_at = Utc.with_ymd_and_hms(2026, 10, 16, 14, 0, 0).unwrap();
    let items = vec![OrderItem {
        id: "i1".to_string(),
        order_id: Some("o1".to_string()),
        food_id: Some("f1".to_string()),
        unit_price: Some(50.0),
        quantity: 3,
        added_at: Some(added_at),
        ..Default::default()
    }];

    let revenue = revenue_by_time_range_from_items(&items, &buckets());
    assert_eq!(revenue.today, 150.0);
    assert_eq!(revenue.total, 150.0);

    let hours = hourly_revenue_from_items(&items, &[], &buckets());
    assert_eq!(hours[14].revenue, 150.0);

    assert_eq!(average_order_value(&[], &items), 150.0);

    let counts = order_counts_by_time_range_from_items(&items, &buckets());
    assert_eq!(counts.today, 1);
    assert_eq!(counts.total, 1);
}

// ============================================================================
// Revenue / count properties
// ============================================================================

#[test]
fn test_total_is_sum_of_order_totals() {
    let orders = vec![
        order("o1", Some(10.0), 1, 0),
        order("o2", None, 1, 3),
        order("o3", Some(2.5), 1, 400),
        Order {
            id: "o4".to_string(),
            total: Some(7.5),
            ..Default::default()
        },
    ];

    let revenue = revenue_by_time_range(&orders, &buckets());
    assert_eq!(revenue.total, 20.0);
    // Undated o4 and last year's o3 stay out of every timed bucket
    assert_eq!(revenue.this_year, 10.0);
    assert_eq!(revenue.today, 10.0);
}

#[test]
fn test_buckets_overlap() {
    let orders = vec![order("o1", Some(10.0), 1, 0)];
    let revenue = revenue_by_time_range(&orders, &buckets());

    let timed = revenue.today + revenue.this_week + revenue.this_month + revenue.this_year;
    assert_eq!(timed, 40.0);
    assert_eq!(revenue.total, 10.0);
}

#[test]
fn test_order_counts_from_orders_and_items() {
    let orders = vec![
        order("o1", Some(1.0), 1, 0),
        order("o2", Some(1.0), 1, 1),
        order("o3", None, 1, 1),
    ];
    let counts = order_counts_by_time_range(&orders, &buckets());
    assert_eq!(counts.today, 1);
    assert_eq!(counts.yesterday, 2);
    assert_eq!(counts.total, 3);

    let items = vec![
        line("o1", "f1", 1.0, 1, 0),
        line("o1", "f2", 1.0, 1, 0),
        line("o2", "f1", 1.0, 1, 1),
    ];
    let counts = order_counts_by_time_range_from_items(&items, &buckets());
    assert_eq!(counts.today, 1);
    assert_eq!(counts.yesterday, 1);
    assert_eq!(counts.this_week, 2);
    assert_eq!(counts.total, 2);
}

#[test]
fn test_orders_take_priority_over_items() {
    let data = Dataset {
        orders: vec![order("o1", Some(100.0), 1, 0)],
        order_items: vec![line("o1", "f1", 1.0, 1, 0)],
        ..Default::default()
    };
    let report = AnalyticsData::compute(&data, &ReportConfig::default(), pinned_now());

    assert_eq!(report.revenue.today, 100.0);
    assert_eq!(report.average_order_value, 100.0);
    assert_eq!(report.sources.totals, ReportSourceKind::Orders);
    assert_eq!(report.sources.time_series, ReportSourceKind::Items);
    // Daily series prefers item lines
    assert_eq!(report.daily.last().map(|d| d.revenue), Some(1.0));
}

// ============================================================================
// Bundle
// ============================================================================

#[test]
fn test_full_analytics_pipeline() {
    let data = generate_dataset(100, 30);
    let config = ReportConfig::default();
    let report = AnalyticsData::compute(&data, &config, pinned_now());

    assert_eq!(report.daily.len(), config.daily_days);
    assert_eq!(report.hourly.len(), 24);
    assert_eq!(report.top_foods.len(), 4);
    assert!(report
        .top_foods
        .windows(2)
        .all(|w| w[0].revenue >= w[1].revenue));
    assert_eq!(report.categories.len(), 1);
    assert_eq!(report.status.total, 100);
    assert_eq!(report.order_counts.total, 100);
    assert_eq!(report.computed_at, pinned_now());

    let item_revenue: f64 = data.order_items.iter().map(OrderItem::line_total).sum();
    assert!((report.categories[0].revenue - item_revenue).abs() < 1e-9);
}

#[test]
fn test_empty_dataset_yields_structured_reports() {
    let report = AnalyticsData::compute(&Dataset::default(), &ReportConfig::default(), pinned_now());

    assert_eq!(report.revenue, RevenueByTimeRange::default());
    assert_eq!(report.daily.len(), 7);
    assert_eq!(report.hourly.len(), 24);
    assert!(report.top_foods.is_empty());
    assert!(report.categories.is_empty());
    assert_eq!(report.average_order_value, 0.0);
    assert!(report.status.is_empty());
    assert_eq!(report.sources.totals, ReportSourceKind::Empty);
    assert!(report.insights().is_empty());
}

#[test]
fn test_compute_is_idempotent() {
    let data = generate_dataset(50, 10);
    let config = ReportConfig::default();
    let first = AnalyticsData::compute(&data, &config, pinned_now());
    let second = AnalyticsData::compute(&data, &config, pinned_now());

    assert_eq!(first.revenue, second.revenue);
    assert_eq!(first.top_foods, second.top_foods);
    assert_eq!(first.categories, second.categories);
    assert_eq!(first.daily, second.daily);
    assert_eq!(first.hourly, second.hourly);
}

#[test]
fn test_inputs_are_not_mutated() {
    let data = generate_dataset(20, 5);
    let before = format!("{:?}", data);
    let _ = AnalyticsData::compute(&data, &ReportConfig::default(), pinned_now());
    assert_eq!(format!("{:?}", data), before);
}

#[test]
fn test_configured_limits_apply() {
    let data = generate_dataset(40, 7);
    let config = ReportConfig {
        top_foods_limit: 2,
        daily_days: 14,
        ..Default::default()
    };
    let report = AnalyticsData::compute(&data, &config, pinned_now());
    assert_eq!(report.top_foods.len(), 2);
    assert_eq!(report.daily.len(), 14);
}

#[test]
fn test_time_zone_of_now_drives_days_and_hours() {
    // 23:30 UTC on the 15th is 01:30 on the 16th at UTC+2
    let tz = FixedOffset::east_opt(2 * 3600).unwrap();
    let now = tz.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
    let items = vec![OrderItem {
        id: "i1".to_string(),
        order_id: Some("o1".to_string()),
        unit_price: Some(10.0),
        quantity: 1,
        added_at: Some(Utc.with_ymd_and_hms(2026, 10, 15, 23, 30, 0).unwrap()),
        ..Default::default()
    }];

    let buckets = TimeBuckets::new(now, WeekStart::Sunday);
    let hours = hourly_revenue_from_items(&items, &[], &buckets);
    assert_eq!(hours[1].revenue, 10.0);

    let daily = daily_revenue_from_items(&items, &[], 7, &buckets);
    assert_eq!(daily[6].label, "10/16");
    assert_eq!(daily[6].revenue, 10.0);
}

// ============================================================================
// Insights
// ============================================================================

#[test]
fn test_insights_report_growth_and_best_seller() {
    let data = Dataset {
        orders: vec![
            order("o1", Some(30.0), 1, 0),
            order("o2", Some(20.0), 1, 1),
            order("o3", Some(5.0), 2, 1),
        ],
        order_items: vec![line("o1", "pho", 10.0, 3, 0)],
        ..Default::default()
    };
    let report = AnalyticsData::compute(&data, &ReportConfig::default(), pinned_now());
    let insights = report.insights();

    assert!(insights.iter().any(|i| i.contains("+20% vs yesterday")));
    assert!(insights.iter().any(|i| i.starts_with("Best seller: PHO")));
    assert!(insights.iter().any(|i| i.starts_with("Cancellations: 1 of 3")));
    assert!(insights.iter().any(|i| i.starts_with("Peak hour: 18:00")));
}

#[test]
fn test_best_seller_share_uses_item_revenue() {
    // Order total disagrees with its lines
    let data = Dataset {
        orders: vec![order("o1", Some(10.0), 1, 0)],
        order_items: vec![line("o1", "pho", 10.0, 3, 0), line("o1", "tea", 2.5, 4, 0)],
        ..Default::default()
    };
    let report = AnalyticsData::compute(&data, &ReportConfig::default(), pinned_now());
    assert_eq!(report.item_revenue, 40.0);

    let best = report
        .insights()
        .into_iter()
        .find(|i| i.starts_with("Best seller"))
        .unwrap();
    assert_eq!(best, "Best seller: PHO with 30.00 (75% of revenue, 3 sold).");
}

#[test]
fn test_insights_report_week_over_week() {
    // Saturday 10/10 closes last week, yesterday has no sales
    let data = Dataset {
        orders: vec![order("o1", Some(30.0), 1, 0), order("o2", Some(10.0), 1, 6)],
        ..Default::default()
    };
    let report = AnalyticsData::compute(&data, &ReportConfig::default(), pinned_now());
    assert_eq!(report.revenue.this_week, 30.0);
    assert_eq!(report.revenue.last_week, 10.0);

    let insights = report.insights();
    assert!(insights
        .iter()
        .any(|i| i == "Revenue this week: 30.00 (+200% vs last week)."));
    assert!(!insights.iter().any(|i| i.contains("vs yesterday")));
}

#[test]
fn test_insights_skip_growth_without_baseline() {
    let data = Dataset {
        orders: vec![order("o1", Some(30.0), 1, 0)],
        ..Default::default()
    };
    let report = AnalyticsData::compute(&data, &ReportConfig::default(), pinned_now());
    let insights = report.insights();

    assert!(!insights.iter().any(|i| i.contains("vs yesterday")));
    assert!(!insights.iter().any(|i| i.contains("vs last week")));
    assert!(insights.iter().any(|i| i.starts_with("Peak hour: 18:00")));
}

#[test]
fn test_cancellation_insight_needs_more_than_ten_percent() {
    let mut orders: Vec<Order> = (0..9)
        .map(|i| order(&format!("o{}", i), Some(10.0), 1, 0))
        .collect();
    orders.push(order("o9", Some(10.0), 2, 0));
    let data = Dataset {
        orders,
        ..Default::default()
    };
    let report = AnalyticsData::compute(&data, &ReportConfig::default(), pinned_now());
    assert_eq!(report.status.canceled, 1);
    assert_eq!(report.status.total, 10);
    assert!(!report
        .insights()
        .iter()
        .any(|i| i.starts_with("Cancellations")));

    let mut data = data;
    data.orders.push(order("o10", Some(10.0), 2, 0));
    let report = AnalyticsData::compute(&data, &ReportConfig::default(), pinned_now());
    assert!(report
        .insights()
        .iter()
        .any(|i| i == "Cancellations: 2 of 11 orders (18%). Review kitchen delays."));
}
