//! dineboard-types - Shared data types for dineboard
//!
//! This crate contains pure data structures without heavy dependencies.
//! No tokio, no async runtime - just serde-serializable types.
//!
//! Used by:
//! - dineboard-core (analytics engine, loaders, export)
//! - dineboard (CLI)

pub mod models;
pub mod reports;

// Re-export model types
pub use models::{Food, FoodCategory, Order, OrderItem, OrderStatus};

// Re-export report types
pub use reports::{
    CategoryPerformance, DailyRevenue, FoodPerformance, HourlyRevenue, OrderCountsByTimeRange,
    OrderStatusDistribution, RevenueByTimeRange,
};
