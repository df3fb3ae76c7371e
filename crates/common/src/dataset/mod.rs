//! Immutable dataset context
//!
//! Both tables are read once at process start, validated, and never mutated
//! afterwards. Every chart and aggregate function borrows from a `Dataset`
//! instead of reaching for module-level state.

pub mod models;

pub use models::{EstimateMethod, EstimateRecord, ReliabilityCode, SourceRecord};

use crate::config::DataConfig;
use crate::errors::{AppError, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The two input tables
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    estimates: Vec<EstimateRecord>,
    sources: Vec<SourceRecord>,
}

impl Dataset {
    /// Wrap already-parsed tables
    pub fn new(estimates: Vec<EstimateRecord>, sources: Vec<SourceRecord>) -> Self {
        Self { estimates, sources }
    }

    /// Load and validate both tables from the configured paths
    pub fn load(config: &DataConfig) -> Result<Self> {
        let estimates: Vec<EstimateRecord> = load_table(&config.estimates_path)?;
        validate_estimates(&estimates, &config.estimates_path)?;

        let sources: Vec<SourceRecord> = load_table(&config.sources_path)?;

        if estimates.is_empty() {
            tracing::warn!(path = %config.estimates_path.display(), "Estimates table is empty");
        }
        if sources.is_empty() {
            tracing::warn!(path = %config.sources_path.display(), "Sources table is empty");
        }

        tracing::info!(
            estimates = estimates.len(),
            sources = sources.len(),
            "Dataset loaded"
        );

        Ok(Self::new(estimates, sources))
    }

    pub fn estimates(&self) -> &[EstimateRecord] {
        &self.estimates
    }

    pub fn sources(&self) -> &[SourceRecord] {
        &self.sources
    }
}

/// A CSV table with a fixed set of required columns
pub trait Table: DeserializeOwned {
    /// Header names that must all be present; extra columns are ignored
    const COLUMNS: &'static [&'static str];
}

impl Table for EstimateRecord {
    const COLUMNS: &'static [&'static str] =
        &["Geography", "Method", "Estimate year", "Value (TWh)"];
}

impl Table for SourceRecord {
    const COLUMNS: &'static [&'static str] = &[
        "Authors",
        "Source",
        "Source (Grouped for Visualisations)",
        "Source Reliability",
        "Citation Count",
    ];
}

/// Read a header-first CSV table from any reader
///
/// Every column in `T::COLUMNS` must appear in the header row, even those
/// whose cells may be blank. Empty cells stay empty strings; an
/// unparseable number fails the whole read.
pub fn read_table<T, R>(reader: R) -> Result<Vec<T>>
where
    T: Table,
    R: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if let Some(column) = T::COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(AppError::MissingColumn {
            column: column.to_string(),
        });
    }

    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()?;
    Ok(rows)
}

/// Read a CSV table from disk, tagging failures with the path
pub fn load_table<T: Table>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|e| AppError::DataLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    read_table(file).map_err(|e| AppError::DataLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

fn validate_estimates(estimates: &[EstimateRecord], path: &Path) -> Result<()> {
    if let Some((index, record)) = estimates
        .iter()
        .enumerate()
        .find(|(_, r)| !r.value_twh.is_finite())
    {
        return Err(AppError::DataLoad {
            path: path.display().to_string(),
            message: format!(
                "row {} has non-finite value {} for {} {}",
                index + 1,
                record.value_twh,
                record.geography,
                record.estimate_year
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    const ESTIMATES_CSV: &str = "\
Publication,Geography,Method,Estimate year,Value (TWh)
Andrae & Edler 2015,Global,Extrapolation,2020,1137
Masanet et al. 2020,Global,Bottom-up,2018,205
Koomey 2011,USA,,2010,76.4
";

    const SOURCES_CSV: &str = "\
Authors,Source,Source (Grouped for Visualisations),Source Reliability,Citation Count
Shehabi et al. 2016,IDC 2014,IDC,EL,512
Shehabi et al. 2016,Koomey 2011,Koomey,EL,512
The Shift Project 2019,Gartner,Gartner,NF,
";

    #[test]
    fn test_read_estimates() {
        let rows: Vec<EstimateRecord> = assert_ok!(read_table(ESTIMATES_CSV.as_bytes()));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].method, EstimateMethod::Extrapolation);
        assert_eq!(rows[1].value_twh, 205.0);
        assert_eq!(rows[2].geography, "USA");
        assert_eq!(rows[2].method, EstimateMethod::Other(String::new()));
    }

    #[test]
    fn test_read_sources_keeps_blanks() {
        let rows: Vec<SourceRecord> = assert_ok!(read_table(SOURCES_CSV.as_bytes()));
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].source_grouped, "IDC");
        assert_eq!(rows[0].reliability, ReliabilityCode::EstablishedLiterature);
        assert_eq!(rows[0].citation_count, Some(512));
        assert_eq!(rows[2].citation_count, None);
        assert_eq!(rows[2].reliability, ReliabilityCode::Other("NF".into()));
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = "Geography,Method,Value (TWh)\nGlobal,Bottom-up,200\n";
        let err = read_table::<EstimateRecord, _>(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::MissingColumn { ref column } if column == "Estimate year"));
    }

    #[test]
    fn test_missing_optional_column_fails() {
        let csv = "\
Authors,Source,Source (Grouped for Visualisations),Source Reliability
A,IDC 2014,IDC,EL
";
        let err = read_table::<SourceRecord, _>(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::MissingColumn { ref column } if column == "Citation Count"));
    }

    #[test]
    fn test_bad_number_fails() {
        let csv = "Geography,Method,Estimate year,Value (TWh)\nGlobal,Bottom-up,2020,lots\n";
        let err = read_table::<EstimateRecord, _>(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Csv(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let config = DataConfig {
            estimates_path: "does/not/exist.csv".into(),
            sources_path: "does/not/exist.csv".into(),
        };
        let err = Dataset::load(&config).unwrap_err();
        assert!(matches!(err, AppError::DataLoad { .. }));
    }

    fn write_temp(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = DataConfig {
            estimates_path: write_temp(&dir, "estimates.csv", ESTIMATES_CSV),
            sources_path: write_temp(&dir, "sources.csv", SOURCES_CSV),
        };

        let dataset = assert_ok!(Dataset::load(&config));
        assert_eq!(dataset.estimates().len(), 3);
        assert_eq!(dataset.sources().len(), 3);
        assert_eq!(dataset.sources()[1].source_grouped, "Koomey");
    }

    #[test]
    fn test_load_header_only_tables() {
        let dir = tempfile::tempdir().unwrap();
        let config = DataConfig {
            estimates_path: write_temp(
                &dir,
                "estimates.csv",
                "Geography,Method,Estimate year,Value (TWh)\n",
            ),
            sources_path: write_temp(
                &dir,
                "sources.csv",
                "Authors,Source,Source (Grouped for Visualisations),Source Reliability,Citation Count\n",
            ),
        };

        let dataset = assert_ok!(Dataset::load(&config));
        assert!(dataset.estimates().is_empty());
        assert!(dataset.sources().is_empty());
    }

    #[test]
    fn test_load_missing_column_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = DataConfig {
            estimates_path: write_temp(&dir, "estimates.csv", ESTIMATES_CSV),
            sources_path: write_temp(&dir, "sources.csv", "Authors,Source\nA,B\n"),
        };

        let err = Dataset::load(&config).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("sources.csv"));
        assert!(message.contains("Source (Grouped for Visualisations)"));
    }

    #[test]
    fn test_validate_rejects_nan() {
        let rows = vec![EstimateRecord::new("Global", "Bottom-up", 2020, f64::NAN)];
        assert_err!(validate_estimates(&rows, Path::new("estimates.csv")));
    }
}
