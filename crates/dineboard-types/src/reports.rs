//! Report output types
//!
//! Every report is a plain value recomputed from the full input collections.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Revenue per (possibly overlapping) time window
///
/// Windows overlap, so the named fields do not sum to `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueByTimeRange {
    pub today: f64,
    pub yesterday: f64,
    pub this_week: f64,
    pub last_week: f64,
    pub this_month: f64,
    pub last_month: f64,
    pub this_year: f64,
    /// Sum over the whole collection, timestamps ignored
    pub total: f64,
}

impl RevenueByTimeRange {
    /// Labelled rows in display order
    pub fn rows(&self) -> [(&'static str, f64); 8] {
        [
            ("Today", self.today),
            ("Yesterday", self.yesterday),
            ("This week", self.this_week),
            ("Last week", self.last_week),
            ("This month", self.this_month),
            ("Last month", self.last_month),
            ("This year", self.this_year),
            ("Total", self.total),
        ]
    }
}

/// Order counts per (possibly overlapping) time window
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCountsByTimeRange {
    pub today: usize,
    pub yesterday: usize,
    pub this_week: usize,
    pub last_week: usize,
    pub this_month: usize,
    pub last_month: usize,
    pub this_year: usize,
    pub total: usize,
}

impl OrderCountsByTimeRange {
    pub fn rows(&self) -> [(&'static str, usize); 8] {
        [
            ("Today", self.today),
            ("Yesterday", self.yesterday),
            ("This week", self.this_week),
            ("Last week", self.last_week),
            ("This month", self.this_month),
            ("Last month", self.last_month),
            ("This year", self.this_year),
            ("Total", self.total),
        ]
    }
}

/// Sales of a single food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPerformance {
    pub food_id: String,
    pub food_name: String,
    pub revenue: f64,
    /// Number of order lines, not distinct orders
    pub order_count: usize,
    pub quantity_sold: u64,
}

/// Sales attributed to a category
///
/// A food listed by several categories contributes its full sale to each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub category_id: String,
    pub category_name: String,
    pub revenue: f64,
    pub order_count: usize,
    pub quantity_sold: u64,
}

/// Revenue for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub date: NaiveDate,
    /// `"{month}/{day}"`, month 1-indexed, no padding
    pub label: String,
    pub revenue: f64,
}

/// Revenue for one hour of the day, across all days
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRevenue {
    /// 0-23
    pub hour: u32,
    pub revenue: f64,
}

impl HourlyRevenue {
    /// Display label (e.g. "14:00")
    pub fn label(&self) -> String {
        format!("{:02}:00", self.hour)
    }
}

/// Orders per status
///
/// Unknown or missing statuses only count toward `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusDistribution {
    pub completed: usize,
    pub in_progress: usize,
    pub canceled: usize,
    pub total: usize,
}

impl OrderStatusDistribution {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Orders whose status is missing or not one of the named ones
    pub fn other(&self) -> usize {
        self.total
            .saturating_sub(self.completed + self.in_progress + self.canceled)
    }
}
