//! Box-plot descriptions for estimate charts

use super::filter::EstimateFilter;
use super::summary::{summarize_by_year, summarize_by_year_and_method, GroupSummary};
use provenance_common::dataset::EstimateRecord;
use serde::{Deserialize, Serialize};

/// Pixel offsets for summary labels, relative to the value they mark
const MAX_YSHIFT: i32 = 10;
const COUNT_YSHIFT: i32 = 25;
const MEDIAN_YSHIFT: i32 = 10;
const MIN_YSHIFT: i32 = -10;

/// Which summary labels to draw on each box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationStyle {
    /// max, n, median, and min
    Full,
    /// Only the count, above the box
    CountOnly,
    None,
}

/// A text label placed on the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: i32,
    pub y: f64,
    pub text: String,
    /// Vertical offset in pixels
    pub yshift: i32,
    /// Color group the label belongs to, for grouped boxes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub showarrow: bool,
}

impl Annotation {
    fn new(x: i32, y: f64, text: String, yshift: i32, group: Option<String>) -> Self {
        Self {
            x,
            y,
            text,
            yshift,
            group,
            showarrow: false,
        }
    }
}

/// Configuration for one box-plot chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotSpec {
    pub filter: EstimateFilter,
    /// Split each year's box by estimate method
    pub group_by_method: bool,
    pub annotations: AnnotationStyle,
}

/// Renderer-facing box-plot description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlot {
    /// Estimate year per row
    pub x: Vec<i32>,
    /// Value in TWh per row
    pub y: Vec<f64>,
    /// Method per row when grouped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_key: Option<String>,
    pub annotations: Vec<Annotation>,
    /// Statistics the annotations were drawn from
    pub summaries: Vec<GroupSummary>,
    pub y_range: [f64; 2],
}

impl BoxPlot {
    pub fn row_count(&self) -> usize {
        self.x.len()
    }
}

impl BoxPlotSpec {
    /// Build the chart for the current toggle state
    ///
    /// Annotations come from the same filtered rows as the boxes, so the
    /// labels always agree with what is drawn.
    pub fn build(&self, estimates: &[EstimateRecord], exclude_outliers: bool) -> BoxPlot {
        let rows = self.filter.apply(estimates, exclude_outliers);

        let summaries = if self.group_by_method {
            summarize_by_year_and_method(&rows)
        } else {
            summarize_by_year(&rows)
        };

        let annotations = summaries
            .iter()
            .flat_map(|s| annotate(s, self.annotations))
            .collect();

        let (color, color_key) = if self.group_by_method {
            (
                Some(rows.iter().map(|r| r.method.to_string()).collect()),
                Some("Method".to_string()),
            )
        } else {
            (None, None)
        };

        let y_max = match self.filter.outlier_threshold {
            Some(threshold) => threshold,
            None => rows.iter().map(|r| r.value_twh).fold(0.0, f64::max),
        };

        tracing::debug!(
            rows = rows.len(),
            groups = summaries.len(),
            exclude_outliers,
            "Built estimate box plot"
        );

        BoxPlot {
            x: rows.iter().map(|r| r.estimate_year).collect(),
            y: rows.iter().map(|r| r.value_twh).collect(),
            color,
            color_key,
            annotations,
            summaries,
            y_range: [0.0, y_max],
        }
    }
}

fn annotate(summary: &GroupSummary, style: AnnotationStyle) -> Vec<Annotation> {
    let group = summary.method.as_ref().map(|m| m.to_string());
    let x = summary.year;

    match style {
        AnnotationStyle::None => Vec::new(),
        AnnotationStyle::CountOnly => vec![Annotation::new(
            x,
            summary.max,
            summary.count.to_string(),
            MAX_YSHIFT,
            group,
        )],
        AnnotationStyle::Full => vec![
            Annotation::new(x, summary.max, format!("max = {}", summary.max), MAX_YSHIFT, group.clone()),
            Annotation::new(x, summary.max, format!("n = {}", summary.count), COUNT_YSHIFT, group.clone()),
            Annotation::new(x, summary.median, format!("median = {}", summary.median), MEDIAN_YSHIFT, group.clone()),
            Annotation::new(x, summary.min, format!("min = {}", summary.min), MIN_YSHIFT, group),
        ],
    }
}
