//! Error types for dineboard-core
//!
//! The analytics engine itself never fails. Errors only come from loading
//! data and configuration, and a [`LoadReport`] lets callers degrade to empty
//! collections instead of aborting.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dineboard operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // IO Errors
    // ===================
    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    // ===================
    // Parse Errors
    // ===================
    #[error("Failed to parse JSON in {path}: {message}")]
    JsonParse {
        path: PathBuf,
        message: String,
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Source Errors
    // ===================
    #[error("Data source unavailable: {message}")]
    SourceUnavailable { message: String },

    #[error("Operation timed out after {timeout_ms}ms: {operation}")]
    Timeout { operation: String, timeout_ms: u64 },

    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// How much a load problem limits the reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// One collection is empty, reports use the rest
    Warning,
    /// Neither orders nor order items loaded, every sales report is empty
    Error,
}

/// One collection that failed to load
#[derive(Debug, Clone)]
pub struct LoadError {
    pub source: String,
    pub message: String,
    pub severity: ErrorSeverity,
    pub suggestion: Option<String>,
}

impl LoadError {
    pub fn warning(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            message: message.into(),
            severity: ErrorSeverity::Warning,
            suggestion: None,
        }
    }

    /// Warning for a collection that degraded to empty, with a hint matched
    /// to the underlying error
    pub fn from_core_error(source: impl Into<String>, error: &CoreError) -> Self {
        let (message, suggestion) = match error {
            CoreError::DirectoryNotFound { path } => (
                format!("Directory not found: {}", path.display()),
                Some("Pass --data-dir or set DINEBOARD_DATA_DIR".to_string()),
            ),
            CoreError::FileRead { path, .. } => (
                format!("Cannot read file: {}", path.display()),
                Some(format!("Check permissions: chmod +r {}", path.display())),
            ),
            CoreError::JsonParse { path, message, .. } => (
                format!("Invalid JSON in {}: {}", path.display(), message),
                Some("Validate JSON syntax with: jq . <file>".to_string()),
            ),
            CoreError::Timeout { .. } => (
                error.to_string(),
                Some("Raise fetch_timeout_ms in dineboard.toml".to_string()),
            ),
            _ => (error.to_string(), None),
        };

        Self {
            suggestion,
            ..Self::warning(source, message)
        }
    }
}

/// Collection sizes and failures of one load
///
/// Failed collections are loaded as empty instead of aborting the run.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub errors: Vec<LoadError>,
    pub orders_loaded: usize,
    pub order_items_loaded: usize,
    pub foods_loaded: usize,
    pub categories_loaded: usize,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_error(&mut self, error: LoadError) {
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True when no sales collection is left to report on
    pub fn has_blocking_errors(&self) -> bool {
        self.errors
            .iter()
            .any(|e| e.severity == ErrorSeverity::Error)
    }

    /// Raise the given sources to [`ErrorSeverity::Error`]
    pub(crate) fn escalate(&mut self, sources: &[&str]) {
        for error in &mut self.errors {
            if sources.contains(&error.source.as_str()) {
                error.severity = ErrorSeverity::Error;
            }
        }
    }

    /// Sources that reported an error, in load order
    pub fn degraded_state(&self) -> DegradedState {
        if self.errors.is_empty() {
            return DegradedState::Healthy;
        }
        let mut missing: Vec<String> = Vec::new();
        for error in &self.errors {
            if !missing.contains(&error.source) {
                missing.push(error.source.clone());
            }
        }
        DegradedState::PartialData {
            reason: format!("{} collection(s) loaded as empty", missing.len()),
            missing,
        }
    }
}

/// Overall health of a load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DegradedState {
    Healthy,
    /// Some collections are missing, reports use what is left
    PartialData {
        missing: Vec<String>,
        reason: String,
    },
}

impl DegradedState {
    pub fn is_healthy(&self) -> bool {
        matches!(self, DegradedState::Healthy)
    }

    pub fn is_degraded(&self) -> bool {
        !self.is_healthy()
    }
}
