//! Rule-based sales insights
//!
//! Short human-readable observations derived from a computed report bundle.

use super::AnalyticsData;

/// Cancellation share above which a warning is emitted
const CANCELLATION_WARN_RATIO: f64 = 0.10;

fn pct_change(current: f64, previous: f64) -> Option<f64> {
    (previous > 0.0).then(|| (current - previous) / previous * 100.0)
}

fn signed_pct(pct: f64) -> String {
    if pct >= 0.0 {
        format!("+{:.0}%", pct)
    } else {
        format!("{:.0}%", pct)
    }
}

/// Generate insights
///
/// Rules:
/// - today vs yesterday revenue (only with a non-zero yesterday)
/// - this week vs last week revenue (only with a non-zero last week)
/// - best-selling food and its share of item revenue
/// - cancellation rate above 10%
/// - peak sales hour
///
/// Returns nothing when there is no revenue and no order.
pub fn generate_insights(data: &AnalyticsData) -> Vec<String> {
    let mut insights = Vec::new();
    let revenue = &data.revenue;

    if revenue.total <= 0.0 && data.status.is_empty() {
        return insights;
    }

    // 1. Day over day
    if let Some(pct) = pct_change(revenue.today, revenue.yesterday) {
        insights.push(format!(
            "Revenue today: {:.2} ({} vs yesterday).",
            revenue.today,
            signed_pct(pct)
        ));
    }

    // 2. Week over week
    if let Some(pct) = pct_change(revenue.this_week, revenue.last_week) {
        insights.push(format!(
            "Revenue this week: {:.2} ({} vs last week).",
            revenue.this_week,
            signed_pct(pct)
        ));
    }

    // 3. Best seller
    if let Some(best) = data.top_foods.first() {
        if data.item_revenue > 0.0 && best.revenue > 0.0 {
            insights.push(format!(
                "Best seller: {} with {:.2} ({:.0}% of revenue, {} sold).",
                best.food_name,
                best.revenue,
                best.revenue / data.item_revenue * 100.0,
                best.quantity_sold
            ));
        }
    }

    // 4. Cancellations
    let status = &data.status;
    if status.total > 0 {
        let ratio = status.canceled as f64 / status.total as f64;
        if ratio > CANCELLATION_WARN_RATIO {
            insights.push(format!(
                "Cancellations: {} of {} orders ({:.0}%). Review kitchen delays.",
                status.canceled,
                status.total,
                ratio * 100.0
            ));
        }
    }

    // 5. Peak hour
    if let Some(peak) = data
        .hourly
        .iter()
        .filter(|h| h.revenue > 0.0)
        .max_by(|a, b| {
            a.revenue
                .partial_cmp(&b.revenue)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    {
        insights.push(format!(
            "Peak hour: {} ({:.2} revenue).",
            peak.label(),
            peak.revenue
        ));
    }

    insights
}
