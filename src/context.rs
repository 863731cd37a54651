//! Startup initialization and shared request state.
//!
//! All training-derived state is built exactly once here, before the
//! listener binds, and is immutable afterwards. Requests share it behind
//! an `Arc` with no synchronization, which is sound because no reload or
//! retrain path exists.

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::dataset;
use crate::error::ForecastError;
use crate::predictor::Predictor;

/// What the loader found, kept for the startup log and health reporting.
#[derive(Debug, Clone, Copy)]
pub struct DatasetSummary {
    pub rows: usize,
    pub skipped_rows: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}

/// Immutable bundle of everything a request handler needs.
#[derive(Debug)]
pub struct ServingContext {
    pub predictor: Predictor,
    pub dataset: DatasetSummary,
}

impl ServingContext {
    /// Load the dataset and fit the model. Any error here is fatal: the
    /// process must not start serving.
    pub fn initialize(cfg: &Config) -> Result<Self, ForecastError> {
        let loaded = dataset::load_records(
            &cfg.dataset.path,
            &cfg.dataset.date_column,
            &cfg.dataset.value_column,
        )?;

        let mut first_date = loaded.records[0].date;
        let mut last_date = first_date;
        for record in &loaded.records {
            first_date = first_date.min(record.date);
            last_date = last_date.max(record.date);
        }

        info!(
            rows = loaded.len(),
            skipped = loaded.skipped_rows,
            %first_date,
            %last_date,
            "historical dataset loaded"
        );

        let predictor = Predictor::fit(&loaded.records, &cfg.model)?;
        let metadata = predictor.metadata();
        info!(
            n_trees = metadata.n_trees,
            training_samples = metadata.training_samples,
            mae = metadata.validation.mae,
            rmse = metadata.validation.rmse,
            r2 = metadata.validation.r2,
            "consumption model trained"
        );

        Ok(Self {
            predictor,
            dataset: DatasetSummary {
                rows: loaded.len(),
                skipped_rows: loaded.skipped_rows,
                first_date,
                last_date,
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub cfg: Config,
    pub ctx: Arc<ServingContext>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self, ForecastError> {
        let ctx = ServingContext::initialize(&cfg)?;
        Ok(Self {
            cfg,
            ctx: Arc::new(ctx),
        })
    }
}
