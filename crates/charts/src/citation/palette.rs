//! Node and link colors for citation diagrams
//!
//! Citing publications are colored by how often they are cited; sources by
//! whether they can still be located and verified. Every class has a dark
//! swatch for nodes and a light one for links.

use provenance_common::dataset::ReliabilityCode;
use serde::Serialize;

/// Grouped source label that is always treated as unavailable
///
/// IDC data is private; even when a publication cites it as literature it
/// cannot be independently checked.
pub const PRIVATE_SOURCE: &str = "IDC";

/// A dark/light color pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Swatch {
    pub dark: &'static str,
    pub light: &'static str,
}

pub const FOUND: Swatch = Swatch { dark: "black", light: "lightgray" };
pub const CITATIONS_GTE1000: Swatch = Swatch { dark: "#ffc6cf", light: "#ffc6cf" };
pub const CITATIONS_GTE500: Swatch = Swatch { dark: "#ffea9c", light: "#ffea9c" };
pub const CITATIONS_GTE100: Swatch = Swatch { dark: "#c6eece", light: "#c6eece" };
// colorbrewer2 PuOr, 3 classes
pub const NOT_FOUND: Swatch = Swatch { dark: "#f1a340", light: "#fcdfba" };

/// Bucket of a publication's citation count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationTier {
    /// 1000 or more
    VeryHigh,
    /// 500 to 999
    High,
    /// 100 to 499
    Medium,
    Default,
}

impl CitationTier {
    /// Classify a count, highest tier first; absent counts as zero
    pub fn from_count(count: Option<u32>) -> Self {
        match count.unwrap_or(0) {
            c if c >= 1000 => CitationTier::VeryHigh,
            c if c >= 500 => CitationTier::High,
            c if c >= 100 => CitationTier::Medium,
            _ => CitationTier::Default,
        }
    }

    pub fn swatch(self) -> Swatch {
        match self {
            CitationTier::VeryHigh => CITATIONS_GTE1000,
            CitationTier::High => CITATIONS_GTE500,
            CitationTier::Medium => CITATIONS_GTE100,
            CitationTier::Default => FOUND,
        }
    }
}

/// Whether a cited source could be found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Unavailable,
}

impl Availability {
    /// The private-source override wins over the stated reliability
    pub fn classify(source_grouped: &str, reliability: &ReliabilityCode) -> Self {
        if source_grouped == PRIVATE_SOURCE {
            Availability::Unavailable
        } else if reliability.is_verifiable() {
            Availability::Available
        } else {
            Availability::Unavailable
        }
    }

    pub fn swatch(self) -> Swatch {
        match self {
            Availability::Available => FOUND,
            Availability::Unavailable => NOT_FOUND,
        }
    }
}
