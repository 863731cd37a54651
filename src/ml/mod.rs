//! Training-time machinery: feature scaling, the forest regressor, and the
//! validation metrics logged after the one-shot fit at startup.

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

pub mod forest;
pub mod scaler;

pub use forest::ForestRegressor;
pub use scaler::StandardScaler;

/// Paired feature matrix and target vector used for the startup fit.
#[derive(Debug, Clone)]
pub struct TrainingDataset {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
}

impl TrainingDataset {
    pub fn new(features: Vec<Vec<f64>>, targets: Vec<f64>) -> Result<Self, ForecastError> {
        if features.len() != targets.len() {
            return Err(ForecastError::Training(format!(
                "feature and target count mismatch: {} features, {} targets",
                features.len(),
                targets.len()
            )));
        }
        Ok(Self { features, targets })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Goodness-of-fit metrics over the training set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub mae: f64,
    pub rmse: f64,
    pub mape: f64,
    pub r2: f64,
}

/// Compute MAE/RMSE/MAPE/R² for a prediction run against known targets.
pub fn calculate_metrics(
    predictions: &[f64],
    targets: &[f64],
) -> Result<ValidationMetrics, ForecastError> {
    if predictions.len() != targets.len() {
        return Err(ForecastError::Training(
            "prediction and target count mismatch".to_string(),
        ));
    }
    if predictions.is_empty() {
        return Err(ForecastError::Training("no predictions to evaluate".to_string()));
    }

    let n = predictions.len() as f64;

    let mae: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (p - t).abs())
        .sum::<f64>()
        / n;

    let mse: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (p - t).powi(2))
        .sum::<f64>()
        / n;
    let rmse = mse.sqrt();

    let mape: f64 = predictions
        .iter()
        .zip(targets.iter())
        .filter(|(_, t)| t.abs() > 1e-10)
        .map(|(p, t)| ((p - t) / t).abs() * 100.0)
        .sum::<f64>()
        / n;

    let mean_target: f64 = targets.iter().sum::<f64>() / n;
    let ss_tot: f64 = targets.iter().map(|t| (t - mean_target).powi(2)).sum();
    let ss_res: f64 = predictions
        .iter()
        .zip(targets.iter())
        .map(|(p, t)| (t - p).powi(2))
        .sum();

    let r2 = if ss_tot.abs() < 1e-10 {
        0.0
    } else {
        1.0 - (ss_res / ss_tot)
    };

    Ok(ValidationMetrics { mae, rmse, mape, r2 })
}
