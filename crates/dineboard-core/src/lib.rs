//! dineboard-core - Core library for dineboard
//!
//! Provides the sales analytics engine, data sources, loader and exporters
//! for restaurant order data.

pub mod analytics;
pub mod config;
pub mod error;
pub mod export;
pub mod source;
pub mod store;

pub use dineboard_types as models;

pub use analytics::{AnalyticsData, Dataset, ReportSourceKind, TimeBuckets, WeekStart};
pub use config::ReportConfig;
pub use error::{CoreError, DegradedState, LoadReport};
pub use export::{export_reports_to_csv, export_reports_to_json, export_reports_to_markdown};
pub use source::{DataSource, JsonDirSource, MemorySource};
pub use store::DataStore;
