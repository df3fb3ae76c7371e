//! Row selection for estimate charts

use crate::stats::GeographyGroup;
use provenance_common::dataset::{EstimateMethod, EstimateRecord};
use serde::{Deserialize, Serialize};

/// Which estimate years a chart covers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearFilter {
    Any,
    In(Vec<i32>),
    /// Every year from this one on
    AtLeast(i32),
}

impl YearFilter {
    pub fn matches(&self, year: i32) -> bool {
        match self {
            YearFilter::Any => true,
            YearFilter::In(years) => years.contains(&year),
            YearFilter::AtLeast(min) => year >= *min,
        }
    }
}

/// Predicate set for selecting estimate rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateFilter {
    pub geography: GeographyGroup,
    pub years: YearFilter,
    /// `None` allows every method
    pub methods: Option<Vec<EstimateMethod>>,
    /// Rows at or above this value are dropped when outliers are excluded;
    /// `None` never drops anything
    #[serde(default)]
    pub outlier_threshold: Option<f64>,
}

impl EstimateFilter {
    pub fn new(geography: GeographyGroup) -> Self {
        Self {
            geography,
            years: YearFilter::Any,
            methods: None,
            outlier_threshold: None,
        }
    }

    pub fn years(mut self, years: YearFilter) -> Self {
        self.years = years;
        self
    }

    pub fn methods(mut self, methods: Vec<EstimateMethod>) -> Self {
        self.methods = Some(methods);
        self
    }

    pub fn outlier_threshold(mut self, threshold: f64) -> Self {
        self.outlier_threshold = Some(threshold);
        self
    }

    pub fn matches(&self, record: &EstimateRecord, exclude_outliers: bool) -> bool {
        self.geography.matches(&record.geography)
            && self.years.matches(record.estimate_year)
            && self
                .methods
                .as_ref()
                .map_or(true, |allowed| allowed.contains(&record.method))
            && !(exclude_outliers
                && self
                    .outlier_threshold
                    .is_some_and(|threshold| record.value_twh >= threshold))
    }

    /// Matching rows in table order
    pub fn apply<'a>(
        &self,
        estimates: &'a [EstimateRecord],
        exclude_outliers: bool,
    ) -> Vec<&'a EstimateRecord> {
        estimates
            .iter()
            .filter(|r| self.matches(r, exclude_outliers))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimates() -> Vec<EstimateRecord> {
        vec![
            EstimateRecord::new("Global", "Bottom-up", 2020, 196.0),
            EstimateRecord::new("Global", "Extrapolation", 2020, 1987.0),
            EstimateRecord::new("Global", "Extrapolation", 2020, 2000.0),
            EstimateRecord::new("Global", "Extrapolation", 2025, 8253.0),
            EstimateRecord::new("Global", "Bottom-up", 2025, 400.0),
            EstimateRecord::new("Global", "", 2030, 1100.0),
            EstimateRecord::new("Global", "Bottom-up", 2015, 300.0),
            EstimateRecord::new("USA", "Bottom-up", 2020, 90.0),
        ]
    }

    fn global_filter() -> EstimateFilter {
        EstimateFilter::new(GeographyGroup::Global)
            .years(YearFilter::In(vec![2020, 2025, 2030]))
            .outlier_threshold(2000.0)
    }

    #[test]
    fn test_exclusion_drops_threshold_and_above() {
        let rows = estimates();
        let selected = global_filter().apply(&rows, true);

        assert!(selected.iter().all(|r| r.value_twh < 2000.0));

        // Every Global row under the threshold for those years is present
        let expected: Vec<&EstimateRecord> = rows
            .iter()
            .filter(|r| r.geography == "Global")
            .filter(|r| [2020, 2025, 2030].contains(&r.estimate_year))
            .filter(|r| r.value_twh < 2000.0)
            .collect();
        assert_eq!(selected, expected);
        assert_eq!(selected.len(), 4);
    }

    #[test]
    fn test_toggle_off_keeps_outliers() {
        let rows = estimates();
        let selected = global_filter().apply(&rows, false);
        assert_eq!(selected.len(), 6);
        assert!(selected.iter().any(|r| r.value_twh == 8253.0));
    }

    #[test]
    fn test_method_filter() {
        let rows = estimates();
        let filter = global_filter().methods(vec![EstimateMethod::BottomUp, EstimateMethod::Extrapolation]);
        let selected = filter.apply(&rows, true);
        assert_eq!(selected.len(), 3);
        assert!(selected.iter().all(|r| r.method != EstimateMethod::Other(String::new())));
    }

    #[test]
    fn test_year_at_least() {
        let rows = estimates();
        let filter = EstimateFilter::new(GeographyGroup::Global).years(YearFilter::AtLeast(2020));
        assert_eq!(filter.apply(&rows, true).len(), 6);
        assert!(!YearFilter::AtLeast(2020).matches(2019));
        assert!(YearFilter::Any.matches(1990));
    }

    #[test]
    fn test_no_threshold_never_excludes() {
        let rows = estimates();
        let filter = EstimateFilter::new(GeographyGroup::All);
        assert_eq!(filter.apply(&rows, true).len(), rows.len());
    }

    #[test]
    fn test_filter_json_round_trip_without_threshold() {
        let filter = EstimateFilter::new(GeographyGroup::Global).years(YearFilter::AtLeast(2010));
        let json = serde_json::to_string(&filter).unwrap();
        let back: EstimateFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filter);
        assert_eq!(back.outlier_threshold, None);
    }
}
