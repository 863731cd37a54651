//! The single page this service exists to serve.

use axum::{extract::State, response::Html};
use chrono::{Datelike, Local, NaiveDate};

use crate::api::error::ApiError;
use crate::chart;
use crate::context::AppState;

/// GET / - today's prediction plus the full-year forecast chart.
///
/// The chart is recomputed on every request; at single-user demo traffic
/// that costs one model sweep per page load and keeps the page stateless.
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let today = Local::now().date_naive();

    let predicted = state.ctx.predictor.predict_date(today)?;
    let chart_uri = chart::render_year_chart(&state.ctx.predictor, today.year(), &state.cfg.chart)?;

    Ok(Html(render_page(
        predicted.round() as i64,
        today,
        &chart_uri,
    )))
}

fn render_page(predicted_mu: i64, date: NaiveDate, chart_uri: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Odisha Power Consumption Forecast</title>
  <style>
    body {{ font-family: sans-serif; max-width: 64rem; margin: 2rem auto; padding: 0 1rem; }}
    .prediction {{ font-size: 1.25rem; }}
    img {{ max-width: 100%; height: auto; border: 1px solid #ddd; }}
  </style>
</head>
<body>
  <h1>Odisha Power Consumption Forecast</h1>
  <p class="prediction">Predicted consumption for {date}: <strong>{predicted} MU</strong></p>
  <img src="{chart}" alt="Estimated daily power consumption for the current year">
</body>
</html>
"#,
        date = date.format("%d/%m/%Y"),
        predicted = predicted_mu,
        chart = chart_uri,
    )
}
