//! Record types for the two input tables

pub mod estimate;
pub mod source;

pub use estimate::{EstimateMethod, EstimateRecord};
pub use source::{ReliabilityCode, SourceRecord};
