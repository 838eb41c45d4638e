//! Source priority between order-level and item-level data
//!
//! Orders are authoritative when present. Without orders, the same metrics
//! are computed from order items so both paths share one aggregation.

use chrono::{DateTime, Utc};
use dineboard_types::{Order, OrderItem};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Which collection a metric was computed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSourceKind {
    Orders,
    Items,
    /// Neither collection had data
    Empty,
}

/// Input of a revenue/count aggregation
#[derive(Debug, Clone, Copy)]
pub enum ReportSource<'a> {
    Orders(&'a [Order]),
    Items(&'a [OrderItem]),
}

impl<'a> ReportSource<'a> {
    /// Orders if any exist, otherwise items
    pub fn select(orders: &'a [Order], items: &'a [OrderItem]) -> Self {
        if orders.is_empty() && !items.is_empty() {
            ReportSource::Items(items)
        } else {
            ReportSource::Orders(orders)
        }
    }

    pub fn kind(&self) -> ReportSourceKind {
        match self {
            ReportSource::Orders(orders) if !orders.is_empty() => ReportSourceKind::Orders,
            ReportSource::Items(items) if !items.is_empty() => ReportSourceKind::Items,
            _ => ReportSourceKind::Empty,
        }
    }

    /// Flatten into monetary records
    pub(crate) fn records(&self) -> Vec<SaleRecord<'a>> {
        match *self {
            ReportSource::Orders(orders) => orders
                .iter()
                .map(|order| SaleRecord {
                    amount: order.total_or_zero(),
                    at: order.created_at,
                    order_id: Some(order.id.as_str()),
                })
                .collect(),
            ReportSource::Items(items) => items
                .iter()
                .map(|item| SaleRecord {
                    amount: item.line_total(),
                    at: item.added_at,
                    order_id: item.order_id.as_deref(),
                })
                .collect(),
        }
    }

    /// Empty order counter matching this source's counting rule
    pub(crate) fn tally(&self) -> OrderTally<'a> {
        match self {
            ReportSource::Orders(_) => OrderTally::Records(0),
            ReportSource::Items(_) => OrderTally::DistinctOrders(HashSet::new()),
        }
    }
}

/// One monetary contribution: an order, or a single order line
#[derive(Debug, Clone, Copy)]
pub(crate) struct SaleRecord<'a> {
    pub amount: f64,
    pub at: Option<DateTime<Utc>>,
    pub order_id: Option<&'a str>,
}

/// Order counter
///
/// Orders count one each. Items count the distinct non-null order ids they
/// reference, so three lines of one order make one order.
#[derive(Debug, Clone)]
pub(crate) enum OrderTally<'a> {
    Records(usize),
    DistinctOrders(HashSet<&'a str>),
}

impl<'a> OrderTally<'a> {
    pub fn add(&mut self, record: &SaleRecord<'a>) {
        match self {
            OrderTally::Records(count) => *count += 1,
            OrderTally::DistinctOrders(seen) => {
                if let Some(order_id) = record.order_id {
                    seen.insert(order_id);
                }
            }
        }
    }

    pub fn value(&self) -> usize {
        match self {
            OrderTally::Records(count) => *count,
            OrderTally::DistinctOrders(seen) => seen.len(),
        }
    }
}
