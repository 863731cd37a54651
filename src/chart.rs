//! Year-long forecast chart rendering.
//!
//! Runs the predictor for every day of the requested year, draws the line
//! series with plotters into an in-memory RGB buffer, PNG-encodes it, and
//! returns a base64 data URI ready to embed in an `<img>` tag.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{Datelike, NaiveDate};
use plotters::prelude::*;

use crate::config::ChartConfig;
use crate::error::ForecastError;
use crate::predictor::Predictor;

/// One predicted point per calendar day, Jan 1 through Dec 31 inclusive
/// (365 points, 366 on a leap year), in date order.
pub fn forecast_series(
    predictor: &Predictor,
    year: i32,
) -> Result<Vec<(NaiveDate, f64)>, ForecastError> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)
        .ok_or_else(|| ForecastError::Chart(format!("invalid year {}", year)))?;

    start
        .iter_days()
        .take_while(|d| d.year() == year)
        .map(|d| predictor.predict_date(d).map(|v| (d, v)))
        .collect()
}

/// Render the full-year forecast as a PNG data URI.
pub fn render_year_chart(
    predictor: &Predictor,
    year: i32,
    cfg: &ChartConfig,
) -> Result<String, ForecastError> {
    let series = forecast_series(predictor, year)?;
    let png = render_png(&series, year, cfg)?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
}

fn render_png(
    series: &[(NaiveDate, f64)],
    year: i32,
    cfg: &ChartConfig,
) -> Result<Vec<u8>, ForecastError> {
    let (width, height) = (cfg.width, cfg.height);
    let mut rgb = vec![0u8; width as usize * height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut rgb, (width, height)).into_drawing_area();
        draw_series_on(&root, series, year)?;
        root.present()
            .map_err(|e| ForecastError::Chart(e.to_string()))?;
    }

    let image = image::RgbImage::from_raw(width, height, rgb)
        .ok_or_else(|| ForecastError::Chart("pixel buffer size mismatch".to_string()))?;

    let mut png = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| ForecastError::Chart(e.to_string()))?;
    Ok(png)
}

fn draw_series_on(
    root: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    series: &[(NaiveDate, f64)],
    year: i32,
) -> Result<(), ForecastError> {
    let chart_err = |e: &dyn std::fmt::Display| ForecastError::Chart(e.to_string());

    root.fill(&WHITE).map_err(|e| chart_err(&e))?;

    let (first, last) = match (series.first(), series.last()) {
        (Some((first, _)), Some((last, _))) => (*first, *last),
        _ => return Err(ForecastError::Chart("empty forecast series".to_string())),
    };

    let min_value = series.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let max_value = series
        .iter()
        .map(|(_, v)| *v)
        .fold(f64::NEG_INFINITY, f64::max);

    // A near-flat series still needs a visible band around the line.
    let value_range = max_value - min_value;
    let margin = if value_range.abs() < 1e-10 {
        max_value.abs() * 0.05 + 0.1
    } else {
        value_range * 0.05
    };
    let y_range = (min_value - margin)..(max_value + margin);

    let mut chart = ChartBuilder::on(root)
        .caption(
            format!("Estimated Power Consumption in {}", year),
            ("sans-serif", 30),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first..last, y_range)
        .map_err(|e| chart_err(&e))?;

    chart
        .configure_mesh()
        .x_labels(12)
        .y_labels(10)
        .x_label_formatter(&|d| d.format("%b").to_string())
        .y_label_formatter(&|v| format!("{:.0}", v))
        .x_desc("Date")
        .y_desc("Power Consumption (MU)")
        .draw()
        .map_err(|e| chart_err(&e))?;

    chart
        .draw_series(LineSeries::new(series.iter().copied(), &BLUE))
        .map_err(|e| chart_err(&e))?
        .label("Estimated Power Consumption")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(|e| chart_err(&e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use crate::dataset::HistoricalRecord;
    use chrono::Duration;

    fn tiny_predictor() -> Predictor {
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        let records: Vec<_> = (0..60)
            .map(|i| HistoricalRecord {
                date: start + Duration::days(i),
                consumption: 90.0 + (i % 7) as f64,
            })
            .collect();
        let cfg = ModelConfig {
            n_trees: 5,
            max_depth: Some(4),
            min_samples_split: 2,
            seed: 1,
        };
        Predictor::fit(&records, &cfg).unwrap()
    }

    #[test]
    fn test_series_covers_every_day_of_a_common_year() {
        let series = forecast_series(&tiny_predictor(), 2023).unwrap();

        assert_eq!(series.len(), 365);
        assert_eq!(series[0].0, NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
        assert_eq!(
            series.last().unwrap().0,
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_series_covers_every_day_of_a_leap_year() {
        let series = forecast_series(&tiny_predictor(), 2024).unwrap();

        assert_eq!(series.len(), 366);
        assert!(series
            .iter()
            .any(|(d, _)| *d == NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
    }

    #[test]
    fn test_series_is_date_ordered() {
        let series = forecast_series(&tiny_predictor(), 2023).unwrap();
        for pair in series.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
    }

    #[test]
    fn test_render_produces_png_data_uri() {
        let cfg = ChartConfig {
            width: 320,
            height: 240,
        };
        let uri = render_year_chart(&tiny_predictor(), 2023, &cfg).unwrap();

        let payload = uri
            .strip_prefix("data:image/png;base64,")
            .expect("data URI prefix");
        let png = BASE64.decode(payload).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
}
