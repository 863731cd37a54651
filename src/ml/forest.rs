//! SmartCore random-forest wrapper.
//!
//! Bootstrap-aggregated regression trees over the scaled calendar
//! features. The forest is fit exactly once at startup and is read-only
//! afterwards; a fixed seed makes repeated fits on the same data agree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_regressor::{
    RandomForestRegressor, RandomForestRegressorParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;

use crate::config::ModelConfig;
use crate::error::ForecastError;
use crate::ml::{calculate_metrics, ValidationMetrics};

/// Facts about the one-shot fit, logged at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestMetadata {
    pub trained_at: DateTime<Utc>,
    pub training_samples: usize,
    pub n_trees: usize,
    pub validation: ValidationMetrics,
}

/// A fitted ensemble regressor.
#[derive(Debug, Serialize, Deserialize)]
pub struct ForestRegressor {
    pub metadata: ForestMetadata,
    /// `None` only for an instance deserialized without its tree ensemble;
    /// such a model cannot predict.
    #[serde(skip)]
    model: Option<RandomForestRegressor<f64, f64, DenseMatrix<f64>, Vec<f64>>>,
}

impl ForestRegressor {
    /// Fit a forest on scaled feature rows against the consumption targets.
    pub fn fit(x: &[Vec<f64>], y: &[f64], cfg: &ModelConfig) -> Result<Self, ForecastError> {
        if x.is_empty() || y.is_empty() {
            return Err(ForecastError::Training(
                "cannot train on an empty dataset".to_string(),
            ));
        }
        if x.len() != y.len() {
            return Err(ForecastError::Training(format!(
                "feature and target count mismatch: {} features, {} targets",
                x.len(),
                y.len()
            )));
        }

        let n_samples = x.len();
        let n_features = x[0].len();

        let mut flat = Vec::with_capacity(n_samples * n_features);
        for row in x {
            if row.len() != n_features {
                return Err(ForecastError::Training(
                    "all feature rows must have the same length".to_string(),
                ));
            }
            flat.extend_from_slice(row);
        }

        let x_matrix = DenseMatrix::new(n_samples, n_features, flat, false);
        let y_vec = y.to_vec();

        let model = RandomForestRegressor::fit(&x_matrix, &y_vec, parameters(cfg))
            .map_err(|e| ForecastError::Training(format!("forest fit failed: {:?}", e)))?;

        let fitted = model
            .predict(&x_matrix)
            .map_err(|e| ForecastError::Training(format!("training-set predict failed: {:?}", e)))?;
        let validation = calculate_metrics(&fitted, y)?;

        Ok(Self {
            metadata: ForestMetadata {
                trained_at: Utc::now(),
                training_samples: n_samples,
                n_trees: cfg.n_trees,
                validation,
            },
            model: Some(model),
        })
    }

    /// Run inference on one scaled feature row.
    pub fn predict(&self, features: &[f64]) -> Result<f64, ForecastError> {
        let model = self.model.as_ref().ok_or(ForecastError::ModelNotTrained)?;

        let x = DenseMatrix::new(1, features.len(), features.to_vec(), false);
        let predictions = model
            .predict(&x)
            .map_err(|e| ForecastError::Training(format!("predict failed: {:?}", e)))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| ForecastError::Training("model returned no prediction".to_string()))
    }
}

fn parameters(cfg: &ModelConfig) -> RandomForestRegressorParameters {
    RandomForestRegressorParameters {
        max_depth: cfg.max_depth,
        min_samples_leaf: 1,
        min_samples_split: cfg.min_samples_split,
        n_trees: cfg.n_trees,
        m: None,
        keep_samples: false,
        seed: cfg.seed,
    }
}
