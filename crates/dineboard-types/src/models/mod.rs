//! Domain models as stored by the document store

pub mod menu;
pub mod order;

pub use menu::{Food, FoodCategory};
pub use order::{Order, OrderItem, OrderStatus};
