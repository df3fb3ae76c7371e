//! Per-group count/min/max/median over a filtered subset

use provenance_common::dataset::{EstimateMethod, EstimateRecord};
use serde::{Deserialize, Serialize};

/// Summary statistics for one box of a box plot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub year: i32,
    /// Set in the method-grouped variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<EstimateMethod>,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl GroupSummary {
    /// Summarize a non-empty group of values
    fn from_values(year: i32, method: Option<EstimateMethod>, mut values: Vec<f64>) -> Option<Self> {
        values.sort_by(f64::total_cmp);
        let median = median_sorted(&values)?;
        Some(Self {
            year,
            method,
            count: values.len(),
            min: values[0],
            max: values[values.len() - 1],
            median,
        })
    }
}

/// Median of sorted values; mean of the middle two for even lengths
pub fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Median of unsorted values
pub fn median(values: &[f64]) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    median_sorted(&sorted)
}

/// Distinct items in first-seen order
fn distinct<T: PartialEq + Clone>(items: impl Iterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

/// One summary per distinct year, in first-seen order
pub fn summarize_by_year(rows: &[&EstimateRecord]) -> Vec<GroupSummary> {
    distinct(rows.iter().map(|r| r.estimate_year))
        .into_iter()
        .filter_map(|year| {
            let values = rows
                .iter()
                .filter(|r| r.estimate_year == year)
                .map(|r| r.value_twh)
                .collect();
            GroupSummary::from_values(year, None, values)
        })
        .collect()
}

/// One summary per (year, method) pair present in the rows
///
/// Years and methods each keep first-seen order; pairs with no rows are
/// skipped.
pub fn summarize_by_year_and_method(rows: &[&EstimateRecord]) -> Vec<GroupSummary> {
    let years = distinct(rows.iter().map(|r| r.estimate_year));
    let methods = distinct(rows.iter().map(|r| &r.method));

    let mut summaries = Vec::new();
    for year in years {
        for method in &methods {
            let values = rows
                .iter()
                .filter(|r| r.estimate_year == year && &r.method == *method)
                .map(|r| r.value_twh)
                .collect();
            if let Some(summary) = GroupSummary::from_values(year, Some((*method).clone()), values) {
                summaries.push(summary);
            }
        }
    }
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimates::EstimateFilter;
    use crate::stats::GeographyGroup;

    #[test]
    fn test_median_conventions() {
        assert_eq!(median(&[]), None);
        assert_eq!(median(&[5.0]), Some(5.0));
        assert_eq!(median(&[30.0, 10.0, 20.0]), Some(20.0));
        assert_eq!(median(&[40.0, 10.0, 30.0, 20.0]), Some(25.0));
    }

    #[test]
    fn test_summary_excludes_outlier() {
        let rows = vec![
            EstimateRecord::new("Global", "Bottom-up", 2020, 10.0),
            EstimateRecord::new("Global", "Bottom-up", 2020, 20.0),
            EstimateRecord::new("Global", "Bottom-up", 2020, 30.0),
            EstimateRecord::new("Global", "Bottom-up", 2020, 2500.0),
        ];
        let filter = EstimateFilter::new(GeographyGroup::Global).outlier_threshold(2000.0);

        let summaries = summarize_by_year(&filter.apply(&rows, true));
        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!((s.year, s.count, s.min, s.median, s.max), (2020, 3, 10.0, 20.0, 30.0));

        let all = summarize_by_year(&filter.apply(&rows, false));
        assert_eq!((all[0].count, all[0].max, all[0].median), (4, 2500.0, 25.0));
    }

    #[test]
    fn test_years_in_first_seen_order() {
        let rows = [
            EstimateRecord::new("Global", "Bottom-up", 2030, 1.0),
            EstimateRecord::new("Global", "Bottom-up", 2010, 2.0),
            EstimateRecord::new("Global", "Bottom-up", 2030, 3.0),
        ];
        let refs: Vec<&EstimateRecord> = rows.iter().collect();
        let years: Vec<i32> = summarize_by_year(&refs).iter().map(|s| s.year).collect();
        assert_eq!(years, vec![2030, 2010]);
    }

    #[test]
    fn test_grouped_skips_empty_pairs() {
        let rows = [
            EstimateRecord::new("Global", "Extrapolation", 2010, 200.0),
            EstimateRecord::new("Global", "Bottom-up", 2010, 190.0),
            EstimateRecord::new("Global", "Extrapolation", 2020, 500.0),
            EstimateRecord::new("Global", "Extrapolation", 2020, 700.0),
        ];
        let refs: Vec<&EstimateRecord> = rows.iter().collect();
        let summaries = summarize_by_year_and_method(&refs);

        let keys: Vec<(i32, String)> = summaries
            .iter()
            .map(|s| (s.year, s.method.as_ref().unwrap().to_string()))
            .collect();
        assert_eq!(
            keys,
            vec![
                (2010, "Extrapolation".to_string()),
                (2010, "Bottom-up".to_string()),
                (2020, "Extrapolation".to_string()),
            ]
        );
        assert_eq!(summaries[2].median, 600.0);
        assert_eq!(summaries[2].count, 2);
    }

    #[test]
    fn test_empty_rows() {
        assert!(summarize_by_year(&[]).is_empty());
        assert!(summarize_by_year_and_method(&[]).is_empty());
    }
}
