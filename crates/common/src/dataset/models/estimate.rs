//! Estimate record: one published energy-consumption figure

use serde::{Deserialize, Serialize};
use std::fmt;

/// How a publication arrived at its estimate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EstimateMethod {
    BottomUp,
    Extrapolation,
    /// Any other label, including blank cells
    Other(String),
}

impl EstimateMethod {
    pub fn as_str(&self) -> &str {
        match self {
            EstimateMethod::BottomUp => "Bottom-up",
            EstimateMethod::Extrapolation => "Extrapolation",
            EstimateMethod::Other(label) => label,
        }
    }
}

impl From<String> for EstimateMethod {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Bottom-up" => EstimateMethod::BottomUp,
            "Extrapolation" => EstimateMethod::Extrapolation,
            _ => EstimateMethod::Other(label),
        }
    }
}

impl From<&str> for EstimateMethod {
    fn from(label: &str) -> Self {
        EstimateMethod::from(label.to_string())
    }
}

impl From<EstimateMethod> for String {
    fn from(method: EstimateMethod) -> Self {
        match method {
            EstimateMethod::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EstimateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the estimates table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRecord {
    /// Free-text region, e.g. "Global", "USA", "EU27"
    #[serde(rename = "Geography")]
    pub geography: String,

    #[serde(rename = "Method")]
    pub method: EstimateMethod,

    /// Year the estimate applies to
    #[serde(rename = "Estimate year")]
    pub estimate_year: i32,

    #[serde(rename = "Value (TWh)")]
    pub value_twh: f64,
}

impl EstimateRecord {
    pub fn new(
        geography: impl Into<String>,
        method: impl Into<EstimateMethod>,
        estimate_year: i32,
        value_twh: f64,
    ) -> Self {
        Self {
            geography: geography.into(),
            method: method.into(),
            estimate_year,
            value_twh,
        }
    }
}
