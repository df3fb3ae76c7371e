//! Provenance Chart Builders
//!
//! Turns the loaded estimate and citation tables into chart descriptions
//! for a generic renderer:
//! - Aggregate review counts (by geography group)
//! - Filtered estimate subsets, per-group summaries, and box plots
//! - Citation Sankey diagrams with availability coloring
//! - The dashboard's figure presets
//!
//! Every builder here is a pure function of a borrowed `Dataset`.

pub mod citation;
pub mod estimates;
pub mod figures;
pub mod stats;

pub use citation::{build_sankey, dedup_citations, CitationSelection, SankeyDiagram, SankeyGraph};
pub use estimates::{BoxPlot, BoxPlotSpec, EstimateFilter, GroupSummary, YearFilter};
pub use figures::{Figure, FigureKind, RenderedFigure};
pub use stats::{count_geography, GeographyGroup, ReviewStats};
