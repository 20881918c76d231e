//! Report generation port trait.

use crate::domain::error::ForecastError;
use crate::domain::forecast::{generate_forecast, ForecastRequest, ForecastResult, ModelType};
use crate::domain::observation::Observation;
use crate::domain::seasonality::{detect_seasonality, SeasonalityReport};
use chrono::NaiveDate;
use serde::Serialize;
use std::path::Path;

/// Everything a renderer needs about one forecast run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastReport {
    pub series: String,
    pub model: ModelType,
    pub forecast_days: usize,
    pub generated_on: NaiveDate,
    pub history_points: usize,
    #[serde(flatten)]
    pub result: ForecastResult,
    pub seasonality: SeasonalityReport,
}

impl ForecastReport {
    /// Run the engine and the weekly detector over one history.
    pub fn assemble(
        request: &ForecastRequest,
        history: &[Observation],
        generated_on: NaiveDate,
    ) -> Self {
        Self {
            series: request.series.clone(),
            model: request.model,
            forecast_days: request.forecast_days,
            generated_on,
            history_points: history.len(),
            result: generate_forecast(history, request.forecast_days, request.model),
            seasonality: detect_seasonality(history),
        }
    }
}

/// Port for writing forecast reports.
pub trait ReportPort {
    fn write(&self, report: &ForecastReport, output_path: &Path) -> Result<(), ForecastError>;

    /// Render to a string instead of a file.
    fn render(&self, report: &ForecastReport) -> Result<String, ForecastError>;
}
