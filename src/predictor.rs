//! Date-to-consumption inference pipeline.

use chrono::NaiveDate;

use crate::config::ModelConfig;
use crate::dataset::HistoricalRecord;
use crate::error::ForecastError;
use crate::features::DateFeatures;
use crate::ml::forest::ForestMetadata;
use crate::ml::{ForestRegressor, StandardScaler, TrainingDataset};

/// Date strings fed to [`Predictor::predict_str`] are ISO dates.
pub const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Scaler and forest fit once over the historical series; composes
/// feature extraction, standardization, and inference per call.
///
/// Every prediction redoes the full extract/scale/infer chain. Each call
/// is cheap, so no caching sits in front of it.
#[derive(Debug)]
pub struct Predictor {
    scaler: StandardScaler,
    forest: ForestRegressor,
}

impl Predictor {
    /// Fit scaler and forest on the historical records.
    pub fn fit(records: &[HistoricalRecord], cfg: &ModelConfig) -> Result<Self, ForecastError> {
        let features: Vec<Vec<f64>> = records
            .iter()
            .map(|r| DateFeatures::from_date(r.date).to_vector())
            .collect();
        let targets: Vec<f64> = records.iter().map(|r| r.consumption).collect();
        let dataset = TrainingDataset::new(features, targets)?;

        let scaler = StandardScaler::fit(&dataset.features)?;
        let scaled = scaler.transform_matrix(&dataset.features)?;
        let forest = ForestRegressor::fit(&scaled, &dataset.targets, cfg)?;

        Ok(Self { scaler, forest })
    }

    /// Forecast consumption for one calendar date.
    pub fn predict_date(&self, date: NaiveDate) -> Result<f64, ForecastError> {
        let vector = DateFeatures::from_date(date).to_vector();
        let scaled = self.scaler.transform(&vector)?;
        self.forest.predict(&scaled)
    }

    /// Forecast consumption for a `YYYY-MM-DD` date string.
    pub fn predict_str(&self, input: &str) -> Result<f64, ForecastError> {
        let date = NaiveDate::parse_from_str(input.trim(), INPUT_DATE_FORMAT)
            .map_err(|e| ForecastError::invalid_date(input, e))?;
        self.predict_date(date)
    }

    pub fn metadata(&self) -> &ForestMetadata {
        &self.forest.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn test_config() -> ModelConfig {
        ModelConfig {
            n_trees: 25,
            max_depth: None,
            min_samples_split: 2,
            seed: 1,
        }
    }

    /// Daily records from 2019-01-01 with consumption = 100 + day_index.
    fn linear_trend(days: i64) -> Vec<HistoricalRecord> {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        (0..days)
            .map(|i| HistoricalRecord {
                date: start + Duration::days(i),
                consumption: 100.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn test_predict_str_matches_predict_date() {
        let predictor = Predictor::fit(&linear_trend(60), &test_config()).unwrap();
        let date = NaiveDate::from_ymd_opt(2019, 2, 10).unwrap();

        assert_eq!(
            predictor.predict_str("2019-02-10").unwrap(),
            predictor.predict_date(date).unwrap()
        );
    }

    #[test]
    fn test_malformed_date_string_is_invalid_date() {
        let predictor = Predictor::fit(&linear_trend(30), &test_config()).unwrap();

        for bad in ["10/02/2019", "not-a-date", "2019-13-40", ""] {
            let err = predictor.predict_str(bad).unwrap_err();
            assert!(
                matches!(err, ForecastError::InvalidDate { .. }),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_prediction_is_idempotent() {
        let predictor = Predictor::fit(&linear_trend(90), &test_config()).unwrap();
        let date = NaiveDate::from_ymd_opt(2019, 2, 20).unwrap();

        let first = predictor.predict_date(date).unwrap();
        let second = predictor.predict_date(date).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_training_is_deterministic_for_a_fixed_seed() {
        let records = linear_trend(120);
        let a = Predictor::fit(&records, &test_config()).unwrap();
        let b = Predictor::fit(&records, &test_config()).unwrap();

        let date = NaiveDate::from_ymd_opt(2019, 3, 15).unwrap();
        assert_eq!(a.predict_date(date).unwrap(), b.predict_date(date).unwrap());
    }

    #[test]
    fn test_linear_trend_held_out_date_within_bounded_error() {
        // Hold out every seventh day, then ask for one of them.
        let all = linear_trend(300);
        let train: Vec<_> = all
            .iter()
            .enumerate()
            .filter(|(i, _)| i % 7 != 3)
            .map(|(_, r)| *r)
            .collect();

        let predictor = Predictor::fit(&train, &test_config()).unwrap();

        let held_out = all[150]; // 150 % 7 == 3, so unseen in training
        let predicted = predictor.predict_date(held_out.date).unwrap();
        assert!(
            (predicted - held_out.consumption).abs() < 25.0,
            "predicted {} for true {}",
            predicted,
            held_out.consumption
        );
    }

    #[test]
    fn test_empty_records_fail_to_fit() {
        assert!(Predictor::fit(&[], &test_config()).is_err());
    }
}
