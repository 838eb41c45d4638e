//! Data sources feeding the analytics engine
//!
//! The persistence layer is outside this crate. A [`DataSource`] only has to
//! list whole collections; the engine never writes back.

use async_trait::async_trait;
use dineboard_types::{Food, FoodCategory, Order, OrderItem};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

use crate::error::CoreError;

pub const ORDERS_FILE: &str = "orders.json";
pub const ORDER_ITEMS_FILE: &str = "order_items.json";
pub const FOODS_FILE: &str = "foods.json";
pub const CATEGORIES_FILE: &str = "categories.json";

/// Read access to the stored collections
///
/// Each call may fail independently; callers decide how to degrade.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn list_all_orders(&self) -> Result<Vec<Order>, CoreError>;

    async fn list_all_order_items(&self) -> Result<Vec<OrderItem>, CoreError>;

    async fn list_all_foods(&self) -> Result<Vec<Food>, CoreError>;

    async fn list_all_categories(&self) -> Result<Vec<FoodCategory>, CoreError>;
}

/// Collections exported as JSON arrays, one file per collection
///
/// A missing file is an empty collection.
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Fails when the directory itself does not exist
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(CoreError::DirectoryNotFound { path: dir });
        }
        Ok(Self::new(dir))
    }

    async fn read_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, CoreError> {
        let path = self.dir.join(file);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Collection file missing, treating as empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(CoreError::FileRead { path, source }),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|source| CoreError::JsonParse {
            message: source.to_string(),
            path,
            source,
        })
    }
}

#[async_trait]
impl DataSource for JsonDirSource {
    async fn list_all_orders(&self) -> Result<Vec<Order>, CoreError> {
        self.read_collection(ORDERS_FILE).await
    }

    async fn list_all_order_items(&self) -> Result<Vec<OrderItem>, CoreError> {
        self.read_collection(ORDER_ITEMS_FILE).await
    }

    async fn list_all_foods(&self) -> Result<Vec<Food>, CoreError> {
        self.read_collection(FOODS_FILE).await
    }

    async fn list_all_categories(&self) -> Result<Vec<FoodCategory>, CoreError> {
        self.read_collection(CATEGORIES_FILE).await
    }
}

/// In-memory collections
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub foods: Vec<Food>,
    pub categories: Vec<FoodCategory>,
}

#[async_trait]
impl DataSource for MemorySource {
    async fn list_all_orders(&self) -> Result<Vec<Order>, CoreError> {
        Ok(self.orders.clone())
    }

    async fn list_all_order_items(&self) -> Result<Vec<OrderItem>, CoreError> {
        Ok(self.order_items.clone())
    }

    async fn list_all_foods(&self) -> Result<Vec<Food>, CoreError> {
        Ok(self.foods.clone())
    }

    async fn list_all_categories(&self) -> Result<Vec<FoodCategory>, CoreError> {
        Ok(self.categories.clone())
    }
}
