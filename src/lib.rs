pub mod api;
pub mod chart;
pub mod config;
pub mod context;
pub mod dataset;
pub mod error;
pub mod features;
pub mod ml;
pub mod predictor;
pub mod telemetry;

pub use error::ForecastError;
