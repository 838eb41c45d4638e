//! Orders and order line items
//!
//! Optional fields mirror what the document store may omit. Aggregations decide
//! per field whether a missing value excludes the record or counts as zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Known order status codes
///
/// Orders keep the raw code (`Order::status`) so that codes outside this
/// enumeration survive a load and can still be counted as "some order".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    InProgress,
    Completed,
    Canceled,
}

impl OrderStatus {
    pub const IN_PROGRESS_CODE: i32 = 0;
    pub const COMPLETED_CODE: i32 = 1;
    pub const CANCELED_CODE: i32 = 2;

    /// Map a stored status code, `None` for unknown codes
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            Self::IN_PROGRESS_CODE => Some(Self::InProgress),
            Self::COMPLETED_CODE => Some(Self::Completed),
            Self::CANCELED_CODE => Some(Self::Canceled),
            _ => None,
        }
    }
}

/// A customer's submitted order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,

    #[serde(default)]
    pub table_id: Option<String>,

    /// Aggregate amount of the order
    #[serde(default)]
    pub total: Option<f64>,

    /// Raw status code, see [`OrderStatus`]
    #[serde(default)]
    pub status: Option<i32>,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Known status, `None` when missing or unknown
    pub fn status(&self) -> Option<OrderStatus> {
        self.status.and_then(OrderStatus::from_code)
    }

    /// Total with a missing amount counted as zero
    pub fn total_or_zero(&self) -> f64 {
        self.total.unwrap_or(0.0)
    }
}

/// One food line within an order
///
/// `unit_price` is the price at the time of ordering. It is deliberately not
/// linked to the food's current price so historical revenue stays stable after
/// a price change or a deleted food.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,

    /// Parent order, absent while the item is not attached to an order yet
    #[serde(default)]
    pub order_id: Option<String>,

    #[serde(default)]
    pub food_id: Option<String>,

    /// Food name copied at order time
    #[serde(default)]
    pub food_name: Option<String>,

    #[serde(default)]
    pub unit_price: Option<f64>,

    #[serde(default)]
    pub quantity: u32,

    #[serde(default)]
    pub status: Option<i32>,

    #[serde(default)]
    pub chef_id: Option<String>,

    #[serde(default)]
    pub table_number: Option<u32>,

    #[serde(default)]
    pub added_at: Option<DateTime<Utc>>,
}

impl OrderItem {
    /// Monetary contribution: `unit_price × quantity` (missing price counts as zero)
    pub fn line_total(&self) -> f64 {
        self.unit_price.unwrap_or(0.0) * self.quantity as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(OrderStatus::from_code(1), Some(OrderStatus::Completed));
        assert_eq!(OrderStatus::from_code(0), Some(OrderStatus::InProgress));
        assert_eq!(OrderStatus::from_code(2), Some(OrderStatus::Canceled));
        assert_eq!(OrderStatus::from_code(99), None);
        assert_eq!(
            Order {
                status: Some(OrderStatus::CANCELED_CODE),
                ..Default::default()
            }
            .status(),
            Some(OrderStatus::Canceled)
        );
    }

    #[test]
    fn test_line_total_uses_stored_price() {
        let item = OrderItem {
            id: "i1".to_string(),
            unit_price: Some(12.5),
            quantity: 4,
            ..Default::default()
        };
        assert_eq!(item.line_total(), 50.0);

        let unpriced = OrderItem {
            quantity: 3,
            ..Default::default()
        };
        assert_eq!(unpriced.line_total(), 0.0);
    }

    #[test]
    fn test_deserialize_sparse_documents() {
        let json = r#"{"id":"o1","total":42.0,"status":99,"createdAt":"2026-02-03T14:30:00Z"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.total, Some(42.0));
        assert_eq!(order.status, Some(99));
        assert_eq!(order.status(), None);
        assert!(order.table_id.is_none());

        let json = r#"{"id":"i1","foodName":"Pho","unitPrice":9.5,"quantity":2}"#;
        let item: OrderItem = serde_json::from_str(json).unwrap();
        assert!(item.order_id.is_none());
        assert!(item.added_at.is_none());
        assert_eq!(item.line_total(), 19.0);
    }
}
