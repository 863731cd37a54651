//! Calendar feature extraction for the consumption model.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Column order of [`DateFeatures::to_vector`]. The scaler and the trained
/// forest both assume this exact order.
pub const FEATURE_NAMES: [&str; 5] = ["year", "month", "day", "day_of_week", "hour"];

/// Numeric encoding of a calendar date used as model input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateFeatures {
    pub year: i32,
    /// 1-12
    pub month: u32,
    /// 1-31
    pub day: u32,
    /// 0=Monday .. 6=Sunday
    pub day_of_week: u32,
    /// Always 0: the source series is daily, so intraday time carries no
    /// signal. Known limitation if hourly data is ever substituted.
    pub hour: u32,
}

impl DateFeatures {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            day_of_week: date.weekday().num_days_from_monday(),
            hour: 0,
        }
    }

    /// Fixed-order vector matching [`FEATURE_NAMES`].
    pub fn to_vector(&self) -> Vec<f64> {
        vec![
            self.year as f64,
            self.month as f64,
            self.day as f64,
            self.day_of_week as f64,
            self.hour as f64,
        ]
    }
}
