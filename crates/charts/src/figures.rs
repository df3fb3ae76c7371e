//! Figure presets
//!
//! The dashboard's charts, each a configuration of the box-plot or Sankey
//! builder.

use crate::citation::{build_sankey, dedup_citations, CitationSelection, SankeyDiagram};
use crate::estimates::{AnnotationStyle, BoxPlot, BoxPlotSpec, EstimateFilter, YearFilter};
use crate::stats::GeographyGroup;
use provenance_common::config::ChartsConfig;
use provenance_common::dataset::{Dataset, EstimateMethod};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Box plots compare these three snapshot years
const SNAPSHOT_YEARS: [i32; 3] = [2010, 2020, 2030];

/// Time-series box plots start here
const SERIES_START: i32 = 2010;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    Box,
    Sankey,
}

impl FigureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FigureKind::Box => "box",
            FigureKind::Sankey => "sankey",
        }
    }
}

/// A chart on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Figure {
    /// Global estimates for 2010, 2020, 2030
    Fig2,
    /// As `Fig2`, split by method
    Fig4,
    /// Global estimates 2010 onwards with counts
    Fig5a,
    /// Global estimates 2010 onwards split by method
    Fig5b,
    /// Citation flow between three early extrapolation studies
    Fig6,
    /// Citation flow between three highly cited publications
    Fig7,
    /// Publications with at least 100 citations
    FigX,
}

impl Figure {
    pub const ALL: [Figure; 7] = [
        Figure::Fig2,
        Figure::Fig4,
        Figure::Fig5a,
        Figure::Fig5b,
        Figure::Fig6,
        Figure::Fig7,
        Figure::FigX,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Figure::Fig2 => "fig-2",
            Figure::Fig4 => "fig-4",
            Figure::Fig5a => "fig-5a",
            Figure::Fig5b => "fig-5b",
            Figure::Fig6 => "fig-6",
            Figure::Fig7 => "fig-7",
            Figure::FigX => "fig-x",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Figure::Fig2 => "Global data center energy estimates for 2010, 2020 and 2030",
            Figure::Fig4 => "Global data center energy estimates for 2010, 2020 and 2030 by method",
            Figure::Fig5a => "Global data center energy estimates for 2010-2030",
            Figure::Fig5b => "Global data center energy estimates for 2010-2030 by method",
            Figure::Fig6 => "Citation flow: Corcoran & Andrae, Andrae & Edler, The Shift Project",
            Figure::Fig7 => "Citation flow: Van Heddeghem et al., Shehabi et al., Malmodin & Lunden",
            Figure::FigX => "Citation flow: publications with at least 100 citations",
        }
    }

    pub fn kind(&self) -> FigureKind {
        match self {
            Figure::Fig2 | Figure::Fig4 | Figure::Fig5a | Figure::Fig5b => FigureKind::Box,
            Figure::Fig6 | Figure::Fig7 | Figure::FigX => FigureKind::Sankey,
        }
    }

    /// Box-plot configuration, for box figures
    pub fn box_spec(&self, outlier_threshold: f64) -> Option<BoxPlotSpec> {
        let snapshot = || {
            EstimateFilter::new(GeographyGroup::Global)
                .years(YearFilter::In(SNAPSHOT_YEARS.to_vec()))
                .methods(vec![EstimateMethod::BottomUp, EstimateMethod::Extrapolation])
                .outlier_threshold(outlier_threshold)
        };
        let series = || {
            EstimateFilter::new(GeographyGroup::Global)
                .years(YearFilter::AtLeast(SERIES_START))
                .outlier_threshold(outlier_threshold)
        };

        let spec = match self {
            Figure::Fig2 => BoxPlotSpec {
                filter: snapshot(),
                group_by_method: false,
                annotations: AnnotationStyle::Full,
            },
            Figure::Fig4 => BoxPlotSpec {
                filter: snapshot(),
                group_by_method: true,
                annotations: AnnotationStyle::Full,
            },
            Figure::Fig5a => BoxPlotSpec {
                filter: series(),
                group_by_method: false,
                annotations: AnnotationStyle::CountOnly,
            },
            Figure::Fig5b => BoxPlotSpec {
                filter: series(),
                group_by_method: true,
                annotations: AnnotationStyle::None,
            },
            Figure::Fig6 | Figure::Fig7 | Figure::FigX => return None,
        };
        Some(spec)
    }

    /// Publication selection and layout height, for Sankey figures
    pub fn sankey_selection(&self) -> Option<(CitationSelection, u32)> {
        fn publications(labels: &[&str]) -> CitationSelection {
            CitationSelection::Publications(labels.iter().map(|l| l.to_string()).collect())
        }

        match self {
            Figure::Fig6 => Some((
                publications(&[
                    "Corcoran & Andrae, 2013",
                    "Andrae & Edler, 2015",
                    "The Shift Project, 2019",
                ]),
                1000,
            )),
            Figure::Fig7 => Some((
                publications(&[
                    "Van Heddeghem et al., 2014",
                    "Shehabi et al., 2016",
                    "Malmodin & Lunden, 2018a",
                ]),
                1000,
            )),
            Figure::FigX => Some((CitationSelection::MinCitations(100), 2000)),
            _ => None,
        }
    }

    /// Build this figure from the dataset
    ///
    /// `exclude_outliers` is the checkbox state; Sankey figures ignore it.
    pub fn render(&self, dataset: &Dataset, charts: &ChartsConfig, exclude_outliers: bool) -> RenderedFigure {
        let figure = if let Some(spec) = self.box_spec(charts.outlier_threshold_twh) {
            FigureData::Box(spec.build(dataset.estimates(), exclude_outliers))
        } else {
            let (selection, height) = self
                .sankey_selection()
                .unwrap_or((CitationSelection::All, 1000));
            let unique = dedup_citations(dataset.sources());
            let graph = build_sankey(&selection.select(&unique));
            FigureData::Sankey(SankeyDiagram::from_graph(
                graph,
                charts.sankey_pad,
                charts.sankey_thickness,
                height,
            ))
        };

        RenderedFigure {
            id: self.id().to_string(),
            title: self.title().to_string(),
            kind: self.kind(),
            figure,
        }
    }
}

impl fmt::Display for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Figure {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Figure::ALL
            .iter()
            .copied()
            .find(|f| f.id() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// Chart payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FigureData {
    Box(BoxPlot),
    Sankey(SankeyDiagram),
}

/// A built figure ready for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedFigure {
    pub id: String,
    pub title: String,
    pub kind: FigureKind,
    pub figure: FigureData,
}
