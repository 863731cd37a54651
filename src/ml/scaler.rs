//! Zero-mean unit-variance feature standardization.

use serde::{Deserialize, Serialize};

use crate::error::ForecastError;

/// Per-column mean and standard deviation, fit once over the training
/// matrix and read-only afterwards.
///
/// Standard deviations are population ones (divide by `n`), matching the
/// statistics the historical model was tuned against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    stds: Vec<f64>,
}

impl StandardScaler {
    /// Fit column statistics over the training matrix.
    ///
    /// All rows must share a width; an empty matrix cannot be fit.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self, ForecastError> {
        let first = rows
            .first()
            .ok_or_else(|| ForecastError::Training("cannot fit scaler on empty matrix".to_string()))?;
        let width = first.len();
        if width == 0 {
            return Err(ForecastError::Training(
                "cannot fit scaler on zero-width rows".to_string(),
            ));
        }

        let n = rows.len() as f64;
        let mut means = vec![0.0; width];
        let mut stds = vec![0.0; width];

        for row in rows {
            if row.len() != width {
                return Err(ForecastError::Training(format!(
                    "ragged feature matrix: expected width {}, found {}",
                    width,
                    row.len()
                )));
            }
            for (col, value) in row.iter().enumerate() {
                means[col] += value;
            }
        }
        for mean in means.iter_mut() {
            *mean /= n;
        }

        for row in rows {
            for (col, value) in row.iter().enumerate() {
                stds[col] += (value - means[col]).powi(2);
            }
        }
        for std in stds.iter_mut() {
            *std = (*std / n).sqrt();
        }

        Ok(Self { means, stds })
    }

    /// Apply `(x - mean) / std` per column.
    ///
    /// A column whose training std was ~0 carries no information, so it
    /// maps to 0.0 instead of dividing by zero.
    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, ForecastError> {
        if row.len() != self.means.len() {
            return Err(ForecastError::Training(format!(
                "scaler fit on {} columns, got {}",
                self.means.len(),
                row.len()
            )));
        }

        Ok(row
            .iter()
            .zip(self.means.iter().zip(self.stds.iter()))
            .map(|(x, (mean, std))| {
                if std.abs() < 1e-10 {
                    0.0
                } else {
                    (x - mean) / std
                }
            })
            .collect())
    }

    /// Transform every row of a matrix.
    pub fn transform_matrix(&self, rows: &[Vec<f64>]) -> Result<Vec<Vec<f64>>, ForecastError> {
        rows.iter().map(|row| self.transform(row)).collect()
    }

    pub fn width(&self) -> usize {
        self.means.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(rows: &[Vec<f64>], col: usize) -> Vec<f64> {
        rows.iter().map(|r| r[col]).collect()
    }

    fn mean_and_std(values: &[f64]) -> (f64, f64) {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, var.sqrt())
    }

    #[test]
    fn test_transformed_training_set_has_zero_mean_unit_std() {
        let rows = vec![
            vec![1.0, 10.0],
            vec![2.0, 20.0],
            vec![3.0, 30.0],
            vec![4.0, 40.0],
        ];
        let scaler = StandardScaler::fit(&rows).unwrap();
        let scaled = scaler.transform_matrix(&rows).unwrap();

        for col in 0..2 {
            let (mean, std) = mean_and_std(&column(&scaled, col));
            assert!(mean.abs() < 1e-9, "column {} mean {}", col, mean);
            assert!((std - 1.0).abs() < 1e-9, "column {} std {}", col, std);
        }
    }

    #[test]
    fn test_constant_column_maps_to_zero() {
        let rows = vec![vec![5.0, 1.0], vec![5.0, 2.0], vec![5.0, 3.0]];
        let scaler = StandardScaler::fit(&rows).unwrap();

        let scaled = scaler.transform(&[5.0, 2.0]).unwrap();
        assert_eq!(scaled[0], 0.0);

        // Even an out-of-range value in a dead column stays finite.
        let scaled = scaler.transform(&[99.0, 2.0]).unwrap();
        assert_eq!(scaled[0], 0.0);
    }

    #[test]
    fn test_dimension_mismatch_is_an_error() {
        let scaler = StandardScaler::fit(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert!(scaler.transform(&[1.0]).is_err());
    }

    #[test]
    fn test_ragged_matrix_is_an_error() {
        let err = StandardScaler::fit(&[vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(matches!(err, ForecastError::Training(_)));
    }

    #[test]
    fn test_empty_matrix_is_an_error() {
        assert!(StandardScaler::fit(&[]).is_err());
    }
}
