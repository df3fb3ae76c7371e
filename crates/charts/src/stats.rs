//! Aggregate review counts
//!
//! Numbers of things included in the review, shown as a short bullet list
//! above the figures.

use crate::citation::dedup_citations;
use provenance_common::{Dataset, EstimateRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Labels that all mean "Europe" across the years of the literature
pub const EUROPE_LABELS: &[&str] = &["EU25", "EU27", "EU28", "Europe", "Western Europe"];

/// Geography predicate for counting and filtering estimates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeographyGroup {
    /// Every row
    All,
    Global,
    Usa,
    /// Union of the historical EU naming variants
    Europe,
    /// Exact label match
    Exact(String),
}

impl GeographyGroup {
    /// Whether a row's geography belongs to this group
    pub fn matches(&self, geography: &str) -> bool {
        match self {
            GeographyGroup::All => true,
            GeographyGroup::Global => geography == "Global",
            GeographyGroup::Usa => geography == "USA",
            GeographyGroup::Europe => EUROPE_LABELS.contains(&geography),
            GeographyGroup::Exact(label) => geography == label,
        }
    }
}

/// Count estimates whose geography falls in `group`
pub fn count_geography(estimates: &[EstimateRecord], group: &GeographyGroup) -> usize {
    estimates
        .iter()
        .filter(|e| group.matches(&e.geography))
        .count()
}

/// Headline counts for the review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_estimates: usize,
    pub global_estimates: usize,
    pub usa_estimates: usize,
    pub europe_estimates: usize,

    /// Rows in the sources table
    pub total_sources: usize,

    /// Distinct (publication, grouped source) pairs
    pub unique_citations: usize,

    /// Distinct citing publications
    pub publications: usize,
}

impl ReviewStats {
    pub fn compute(dataset: &Dataset) -> Self {
        let estimates = dataset.estimates();
        let sources = dataset.sources();

        let publications: HashSet<&str> = sources.iter().map(|s| s.authors.as_str()).collect();

        Self {
            total_estimates: estimates.len(),
            global_estimates: count_geography(estimates, &GeographyGroup::Global),
            usa_estimates: count_geography(estimates, &GeographyGroup::Usa),
            europe_estimates: count_geography(estimates, &GeographyGroup::Europe),
            total_sources: sources.len(),
            unique_citations: dedup_citations(sources).len(),
            publications: publications.len(),
        }
    }

    /// Render as the dashboard's markdown bullet list
    pub fn to_markdown(&self) -> String {
        let lines = [
            format!("- Total estimates: {}.", self.total_estimates),
            "- Estimates by country:".to_string(),
            format!("    - Global: {}.", self.global_estimates),
            format!("    - US: {}.", self.usa_estimates),
            format!("    - Europe: {}.", self.europe_estimates),
            format!(
                "- Sources: {} ({} unique across {} publications).",
                self.total_sources, self.unique_citations, self.publications
            ),
        ];
        lines.join("\n") + "\n"
    }
}
