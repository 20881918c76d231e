//! HTTP request handlers for web adapter.

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::domain::forecast::{ForecastRequest, ModelType, DEFAULT_FORECAST_DAYS};
use crate::domain::observation::{is_valid_series_name, DateRange, Observation};
use crate::domain::seasonality::{detect_seasonality, SeasonalityReport};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ForecastReport;

use super::{AppState, WebError};

pub const MAX_FORECAST_DAYS: usize = 365;

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

impl RangeQuery {
    fn to_range(&self) -> Result<DateRange, WebError> {
        Ok(DateRange {
            start: parse_date("start", self.start.as_deref())?,
            end: parse_date("end", self.end.as_deref())?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastQuery {
    pub days: Option<String>,
    pub model: Option<String>,
    #[serde(flatten)]
    pub range: RangeQuery,
}

fn parse_date(name: &str, value: Option<&str>) -> Result<Option<NaiveDate>, WebError> {
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| WebError::bad_request(format!("invalid {} date, expected YYYY-MM-DD", name))),
    }
}

fn fetch_history(
    state: &AppState,
    series: &str,
    range: DateRange,
) -> Result<Vec<Observation>, WebError> {
    if !is_valid_series_name(series) {
        return Err(WebError::bad_request(format!("invalid series name '{}'", series)));
    }
    let history = state.data_port.fetch_prices(series, range)?;
    if history.is_empty() {
        return Err(WebError::not_found(format!("no data for series {}", series)));
    }
    Ok(history)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_series(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, WebError> {
    Ok(Json(state.data_port.list_series()?))
}

pub async fn prices(
    State(state): State<Arc<AppState>>,
    Path(series): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<Vec<Observation>>, WebError> {
    let range = query.to_range()?;
    Ok(Json(fetch_history(&state, &series, range)?))
}

/// Query values override `[forecast]` config, which overrides defaults.
pub async fn forecast(
    State(state): State<Arc<AppState>>,
    Path(series): Path<String>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ForecastReport>, WebError> {
    let configured_days = state
        .config
        .get_int("forecast", "days", DEFAULT_FORECAST_DAYS as i64);
    let days = match query.days.as_deref() {
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| WebError::bad_request(format!("invalid days '{}'", raw)))?,
        None => configured_days,
    };
    if days < 1 || days as usize > MAX_FORECAST_DAYS {
        return Err(WebError::bad_request(format!(
            "days must be between 1 and {}",
            MAX_FORECAST_DAYS
        )));
    }

    let model = query
        .model
        .or_else(|| state.config.get_string("forecast", "model"))
        .map(|m| ModelType::from_name(&m))
        .unwrap_or_default();

    let mut request = ForecastRequest::new(series);
    request.forecast_days = days as usize;
    request.model = model;
    request.range = query.range.to_range()?;

    let history = fetch_history(&state, &request.series, request.range)?;
    tracing::info!(
        series = %request.series,
        model = %request.model,
        days = request.forecast_days,
        points = history.len(),
        "serving forecast"
    );
    Ok(Json(ForecastReport::assemble(
        &request,
        &history,
        Local::now().date_naive(),
    )))
}

pub async fn seasonality(
    State(state): State<Arc<AppState>>,
    Path(series): Path<String>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<SeasonalityReport>, WebError> {
    let range = query.to_range()?;
    let history = fetch_history(&state, &series, range)?;
    Ok(Json(detect_seasonality(&history)))
}

pub async fn not_found() -> WebError {
    WebError::not_found("not found")
}
