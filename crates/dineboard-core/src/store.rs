//! Concurrent loading of the report inputs
//!
//! The four collections are fetched concurrently. A fetch that fails or
//! exceeds the timeout becomes an empty collection plus a warning in the
//! [`LoadReport`], so the source-priority fallback can still kick in.

use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use crate::analytics::Dataset;
use crate::config::ReportConfig;
use crate::error::{CoreError, LoadError, LoadReport};
use crate::source::DataSource;

/// Loader for one report run
///
/// Holds no data between runs: each [`DataStore::load`] fetches fresh
/// collections and hands them to the caller.
#[derive(Debug, Clone)]
pub struct DataStore {
    fetch_timeout: Duration,
}

impl DataStore {
    pub fn new(fetch_timeout: Duration) -> Self {
        Self { fetch_timeout }
    }

    pub fn from_config(config: &ReportConfig) -> Self {
        Self::new(config.fetch_timeout())
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    async fn fetch<T, F>(&self, operation: &str, fut: F) -> Result<Vec<T>, CoreError>
    where
        F: Future<Output = Result<Vec<T>, CoreError>>,
    {
        match tokio::time::timeout(self.fetch_timeout, fut).await {
            Ok(result) => result,
            Err(_) => Err(CoreError::Timeout {
                operation: operation.to_string(),
                timeout_ms: self.fetch_timeout.as_millis() as u64,
            }),
        }
    }

    /// Fetch every collection concurrently
    ///
    /// Never fails: degraded collections are reported, not raised.
    pub async fn load<S>(&self, source: &S) -> (Dataset, LoadReport)
    where
        S: DataSource + ?Sized,
    {
        let (orders, order_items, foods, categories) = tokio::join!(
            self.fetch("list orders", source.list_all_orders()),
            self.fetch("list order items", source.list_all_order_items()),
            self.fetch("list foods", source.list_all_foods()),
            self.fetch("list categories", source.list_all_categories()),
        );

        let mut report = LoadReport::new();
        let dataset = Dataset {
            orders: or_empty("orders", orders, &mut report),
            order_items: or_empty("order_items", order_items, &mut report),
            foods: or_empty("foods", foods, &mut report),
            categories: or_empty("categories", categories, &mut report),
        };

        if orders_failed(&report) && items_failed(&report) {
            report.escalate(&["orders", "order_items"]);
        }

        report.orders_loaded = dataset.orders.len();
        report.order_items_loaded = dataset.order_items.len();
        report.foods_loaded = dataset.foods.len();
        report.categories_loaded = dataset.categories.len();

        info!(
            orders = report.orders_loaded,
            order_items = report.order_items_loaded,
            foods = report.foods_loaded,
            categories = report.categories_loaded,
            errors = report.errors.len(),
            "Data load complete"
        );

        (dataset, report)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

fn orders_failed(report: &LoadReport) -> bool {
    report.errors.iter().any(|e| e.source == "orders")
}

fn items_failed(report: &LoadReport) -> bool {
    report.errors.iter().any(|e| e.source == "order_items")
}

fn or_empty<T>(
    collection: &str,
    result: Result<Vec<T>, CoreError>,
    report: &mut LoadReport,
) -> Vec<T> {
    match result {
        Ok(values) => values,
        Err(e) => {
            warn!(collection, error = %e, "Fetch failed, using empty collection");
            report.add_error(LoadError::from_core_error(collection, &e));
            Vec::new()
        }
    }
}
