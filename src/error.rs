use thiserror::Error;

/// Errors produced by the forecast pipeline.
///
/// Everything here is either fatal at startup (`DataLoad`, `Training`) or
/// surfaced as an error response by the API layer.
#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("failed to load dataset: {0}")]
    DataLoad(String),

    #[error("invalid date {input:?}: {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("model has not been trained")]
    ModelNotTrained,

    #[error("model training failed: {0}")]
    Training(String),

    #[error("chart rendering failed: {0}")]
    Chart(String),
}

impl ForecastError {
    pub fn invalid_date(input: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidDate {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}
