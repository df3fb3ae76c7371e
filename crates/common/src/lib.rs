//! Provenance Dashboard Common Library
//!
//! Shared code for the provenance dashboard crates including:
//! - Estimate and citation record types
//! - One-time CSV loading into an immutable dataset context
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod config;
pub mod dataset;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use config::AppConfig;
pub use dataset::{Dataset, EstimateRecord, SourceRecord};
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default estimates table location
pub const DEFAULT_ESTIMATES_PATH: &str = "data/estimates.csv";

/// Default sources table location
pub const DEFAULT_SOURCES_PATH: &str = "data/sources.csv";
