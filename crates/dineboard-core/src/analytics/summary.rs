//! Summary statistics: average order value and status distribution

use dineboard_types::{Order, OrderItem, OrderStatus, OrderStatusDistribution};
use std::collections::HashMap;

/// Average order value
///
/// Uses order totals (missing totals count as zero) when orders exist, else the
/// per-order sums of items grouped by parent order. Zero when both are empty.
pub fn average_order_value(orders: &[Order], items: &[OrderItem]) -> f64 {
    if orders.is_empty() {
        return average_order_value_from_items(items);
    }

    let sum: f64 = orders.iter().map(Order::total_or_zero).sum();
    sum / orders.len() as f64
}

/// Average of per-order item sums
///
/// Items without a parent order are left out. Zero when no item references an
/// order.
pub fn average_order_value_from_items(items: &[OrderItem]) -> f64 {
    let mut per_order: HashMap<&str, f64> = HashMap::new();
    for item in items {
        if let Some(order_id) = item.order_id.as_deref() {
            *per_order.entry(order_id).or_default() += item.line_total();
        }
    }

    if per_order.is_empty() {
        return 0.0;
    }
    per_order.values().sum::<f64>() / per_order.len() as f64
}

/// Orders per known status
///
/// Missing and unknown codes only count toward `total`. No orders yields an
/// all-zero distribution.
pub fn order_status_distribution(orders: &[Order]) -> OrderStatusDistribution {
    let mut distribution = OrderStatusDistribution {
        total: orders.len(),
        ..Default::default()
    };

    for order in orders {
        match order.status() {
            Some(OrderStatus::Completed) => distribution.completed += 1,
            Some(OrderStatus::InProgress) => distribution.in_progress += 1,
            Some(OrderStatus::Canceled) => distribution.canceled += 1,
            None => {}
        }
    }

    distribution
}
