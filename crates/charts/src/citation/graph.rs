//! Citation Sankey graph construction
//!
//! Walks citation rows once, assigning each distinct label a node index in
//! first-seen order and emitting one edge per row.

use super::palette::{Availability, CitationTier};
use provenance_common::SourceRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parallel arrays describing a Sankey diagram
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SankeyGraph {
    /// Unique node names, first-seen order
    pub labels: Vec<String>,

    /// One color per label, fixed when the label is first seen
    pub colors_node: Vec<String>,

    /// One color per edge
    pub colors_link: Vec<String>,

    /// Edge start: the cited source's node index
    pub sources: Vec<usize>,

    /// Edge end: the citing publication's node index
    pub targets: Vec<usize>,

    /// Edge weights, always 1
    pub values: Vec<u32>,
}

impl SankeyGraph {
    pub fn node_count(&self) -> usize {
        self.labels.len()
    }

    pub fn edge_count(&self) -> usize {
        self.sources.len()
    }

    /// Index of the node with this label
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Insert a label if unseen and return its index
    fn intern(&mut self, index: &mut HashMap<String, usize>, label: &str, color: &str) -> usize {
        if let Some(&existing) = index.get(label) {
            return existing;
        }
        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.colors_node.push(color.to_string());
        index.insert(label.to_string(), id);
        id
    }
}

/// Build a Sankey graph from citation rows
///
/// Rows are expected to be deduplicated on (publication, grouped source)
/// already; repeated pairs here each become their own edge. Node size in the
/// rendered diagram follows edge count, so every edge weighs 1.
pub fn build_sankey(rows: &[SourceRecord]) -> SankeyGraph {
    let mut graph = SankeyGraph::default();
    let mut index: HashMap<String, usize> = HashMap::with_capacity(rows.len() * 2);

    for row in rows {
        let publication_color = CitationTier::from_count(row.citation_count).swatch();
        let target = graph.intern(&mut index, &row.authors, publication_color.dark);

        let availability = Availability::classify(&row.source_grouped, &row.reliability);
        let source_color = availability.swatch();
        let source = graph.intern(&mut index, &row.source_grouped, source_color.dark);

        graph.sources.push(source);
        graph.targets.push(target);
        graph.colors_link.push(source_color.light.to_string());
        graph.values.push(1);
    }

    tracing::debug!(
        rows = rows.len(),
        nodes = graph.node_count(),
        "Built citation sankey"
    );

    graph
}
