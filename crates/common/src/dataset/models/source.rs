//! Source record: one citing-publication -> cited-source relationship

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verifiability classification of a cited source
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReliabilityCode {
    /// "EL"
    EstablishedLiterature,
    /// "PD"
    PubliclyDocumented,
    /// Anything else, including blank cells
    Other(String),
}

impl ReliabilityCode {
    pub fn as_str(&self) -> &str {
        match self {
            ReliabilityCode::EstablishedLiterature => "EL",
            ReliabilityCode::PubliclyDocumented => "PD",
            ReliabilityCode::Other(code) => code,
        }
    }

    /// Whether the source can be located and checked independently
    pub fn is_verifiable(&self) -> bool {
        matches!(
            self,
            ReliabilityCode::EstablishedLiterature | ReliabilityCode::PubliclyDocumented
        )
    }
}

impl From<String> for ReliabilityCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "EL" => ReliabilityCode::EstablishedLiterature,
            "PD" => ReliabilityCode::PubliclyDocumented,
            _ => ReliabilityCode::Other(code),
        }
    }
}

impl From<&str> for ReliabilityCode {
    fn from(code: &str) -> Self {
        ReliabilityCode::from(code.to_string())
    }
}

impl From<ReliabilityCode> for String {
    fn from(code: ReliabilityCode) -> Self {
        match code {
            ReliabilityCode::Other(code) => code,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ReliabilityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A row of the sources table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRecord {
    /// Citing publication, e.g. "Andrae & Edler, 2015"
    #[serde(rename = "Authors")]
    pub authors: String,

    /// Raw cited source
    #[serde(rename = "Source")]
    pub source: String,

    /// Coarser source name used to merge near-duplicates in diagrams
    #[serde(rename = "Source (Grouped for Visualisations)")]
    pub source_grouped: String,

    #[serde(rename = "Source Reliability")]
    pub reliability: ReliabilityCode,

    /// Citation count of the citing publication; blank cells load as `None`
    #[serde(rename = "Citation Count")]
    pub citation_count: Option<u32>,
}

impl SourceRecord {
    pub fn new(
        authors: impl Into<String>,
        source_grouped: impl Into<String>,
        reliability: impl Into<ReliabilityCode>,
        citation_count: Option<u32>,
    ) -> Self {
        let source_grouped = source_grouped.into();
        Self {
            authors: authors.into(),
            source: source_grouped.clone(),
            source_grouped,
            reliability: reliability.into(),
            citation_count,
        }
    }

    /// Citation count with absent treated as zero
    pub fn citations(&self) -> u32 {
        self.citation_count.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reliability_parsing() {
        assert_eq!(ReliabilityCode::from("EL"), ReliabilityCode::EstablishedLiterature);
        assert_eq!(ReliabilityCode::from("PD"), ReliabilityCode::PubliclyDocumented);
        assert_eq!(ReliabilityCode::from("NF"), ReliabilityCode::Other("NF".into()));
        assert!(ReliabilityCode::from("EL").is_verifiable());
        assert!(!ReliabilityCode::from("el").is_verifiable());
        assert!(!ReliabilityCode::from("").is_verifiable());
    }

    #[test]
    fn test_absent_citations_are_zero() {
        let record = SourceRecord::new("Koomey, 2011", "EPA", "EL", None);
        assert_eq!(record.citations(), 0);
        assert_eq!(record.source, "EPA");
    }
}
