//! Historical consumption dataset ingestion.
//!
//! Reads the daily regional consumption CSV once at startup. Rows whose
//! date or value fail to parse are dropped and counted; file order is
//! preserved for the rows that survive.

use chrono::NaiveDate;
use std::path::Path;
use tracing::debug;

use crate::error::ForecastError;

/// Dates in the source file are day-first.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// One day of historical consumption for the region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalRecord {
    pub date: NaiveDate,
    /// Consumption magnitude in million units (MU).
    pub consumption: f64,
}

/// Result of a dataset load, with the dropped-row count for startup logging.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub records: Vec<HistoricalRecord>,
    pub skipped_rows: usize,
}

impl LoadedDataset {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Load the historical consumption series from a headed CSV file.
///
/// Fails with [`ForecastError::DataLoad`] when the file is unreadable,
/// either column is missing from the header, or no row parses at all.
pub fn load_records(
    path: &Path,
    date_column: &str,
    value_column: &str,
) -> Result<LoadedDataset, ForecastError> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| ForecastError::DataLoad(format!("{}: {}", path.display(), e)))?;

    let headers = reader
        .headers()
        .map_err(|e| ForecastError::DataLoad(format!("unreadable header row: {}", e)))?;

    let date_idx = column_index(headers, date_column)?;
    let value_idx = column_index(headers, value_column)?;

    let mut records = Vec::new();
    let mut skipped_rows = 0usize;

    for row in reader.records() {
        let row = row.map_err(|e| ForecastError::DataLoad(format!("unreadable row: {}", e)))?;
        let date = row
            .get(date_idx)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok());
        let consumption = row
            .get(value_idx)
            .and_then(|s| s.trim().parse::<f64>().ok());

        match (date, consumption) {
            (Some(date), Some(consumption)) => {
                records.push(HistoricalRecord { date, consumption })
            }
            _ => skipped_rows += 1,
        }
    }

    if records.is_empty() {
        return Err(ForecastError::DataLoad(format!(
            "{}: no rows with a parseable {} date and numeric {} value",
            path.display(),
            date_column,
            value_column
        )));
    }

    debug!(
        rows = records.len(),
        skipped = skipped_rows,
        "loaded consumption dataset"
    );

    Ok(LoadedDataset {
        records,
        skipped_rows,
    })
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize, ForecastError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or_else(|| ForecastError::DataLoad(format!("missing column {:?} in header", name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("testdata")
            .join(name)
    }

    #[test]
    fn test_load_sample_dataset() {
        let loaded = load_records(&fixture("consumption_sample.csv"), "Dt", "Odisha").unwrap();

        assert!(loaded.len() > 50);
        // The fixture contains two deliberately malformed rows.
        assert_eq!(loaded.skipped_rows, 2);

        let first = &loaded.records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2019, 1, 1).unwrap());
        assert!(first.consumption > 0.0);

        // Insertion order must follow file order.
        for pair in loaded.records.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn test_missing_file_is_data_load_error() {
        let err = load_records(Path::new("testdata/nope.csv"), "Dt", "Odisha").unwrap_err();
        assert!(matches!(err, ForecastError::DataLoad(_)));
    }

    #[test]
    fn test_missing_column_is_data_load_error() {
        let err =
            load_records(&fixture("consumption_sample.csv"), "Dt", "WestBengal").unwrap_err();
        assert!(matches!(err, ForecastError::DataLoad(_)));
        assert!(err.to_string().contains("WestBengal"));
    }

    #[test]
    fn test_all_unparseable_dates_fail_instead_of_training_on_nothing() {
        let err = load_records(&fixture("bad_dates.csv"), "Dt", "Odisha").unwrap_err();
        assert!(matches!(err, ForecastError::DataLoad(_)));
    }
}
