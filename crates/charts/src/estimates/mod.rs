//! Energy estimate charts
//!
//! One parameterized builder covers every box-plot variant: a filter over
//! geography, years, and methods, an outlier toggle, and an optional split
//! by method.

mod boxplot;
mod filter;
pub mod summary;

pub use boxplot::{Annotation, AnnotationStyle, BoxPlot, BoxPlotSpec};
pub use filter::{EstimateFilter, YearFilter};
pub use summary::{median, summarize_by_year, summarize_by_year_and_method, GroupSummary};
