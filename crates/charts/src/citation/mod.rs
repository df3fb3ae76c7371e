//! Citation flow diagrams
//!
//! Shows which sources each reviewed publication relies on, colored by
//! whether those sources can still be found.

mod graph;
pub mod palette;

pub use graph::{build_sankey, SankeyGraph};
pub use palette::{Availability, CitationTier, Swatch};

use provenance_common::SourceRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Keep the first row for each (publication, grouped source) pair
///
/// Preserves table order. This is the upstream step `build_sankey` assumes
/// has already run.
pub fn dedup_citations(rows: &[SourceRecord]) -> Vec<SourceRecord> {
    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(rows.len());
    let mut unique = Vec::with_capacity(rows.len());

    for row in rows {
        if seen.insert((row.authors.as_str(), row.source_grouped.as_str())) {
            unique.push(row.clone());
        }
    }

    unique
}

/// Which citing publications a diagram covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CitationSelection {
    All,
    /// Rows whose publication is one of these labels
    Publications(Vec<String>),
    /// Rows whose publication has at least this many citations
    MinCitations(u32),
}

impl CitationSelection {
    pub fn matches(&self, row: &SourceRecord) -> bool {
        match self {
            CitationSelection::All => true,
            CitationSelection::Publications(labels) => labels.iter().any(|l| *l == row.authors),
            CitationSelection::MinCitations(min) => row.citations() >= *min,
        }
    }

    /// Matching rows in table order
    pub fn select(&self, rows: &[SourceRecord]) -> Vec<SourceRecord> {
        rows.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Node presentation for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyNodes {
    pub pad: u32,
    pub thickness: u32,
    pub label: Vec<String>,
    pub color: Vec<String>,
}

/// Link presentation for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyLinks {
    pub source: Vec<usize>,
    pub target: Vec<usize>,
    pub value: Vec<u32>,
    pub color: Vec<String>,
}

/// Renderer-facing Sankey description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SankeyDiagram {
    pub node: SankeyNodes,
    pub link: SankeyLinks,
    /// Layout height in pixels
    pub height: u32,
}

impl SankeyDiagram {
    pub fn from_graph(graph: SankeyGraph, pad: u32, thickness: u32, height: u32) -> Self {
        Self {
            node: SankeyNodes {
                pad,
                thickness,
                label: graph.labels,
                color: graph.colors_node,
            },
            link: SankeyLinks {
                source: graph.sources,
                target: graph.targets,
                value: graph.values,
                color: graph.colors_link,
            },
            height,
        }
    }
}
