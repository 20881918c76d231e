//! Forecast generation.
//!
//! Three projection models share one output shape:
//! - `Linear`: OLS line over (index, price), interval widening with distance
//! - `Wma`: last WMA(14) level plus a damped short-term step
//! - `Ets`: last ETS(0.3) level plus the average smoothed drift
//!
//! Every call is pure: identical input gives identical output.

use chrono::{Days, NaiveDate};
use serde::Serialize;
use std::fmt;

use crate::domain::decimal::round_cents;
use crate::domain::metrics::Metrics;
use crate::domain::observation::{DateRange, Observation};
use crate::domain::regression::{linear_regression, residual_std_dev};
use crate::domain::smoothing::{
    calculate_ets, calculate_wma, DEFAULT_ETS_ALPHA, FORECAST_WMA_WINDOW,
};

pub const DEFAULT_FORECAST_DAYS: usize = 30;

/// Two-sided 95% normal quantile.
const Z_95: f64 = 1.96;
const LINEAR_MIN_STD_DEV: f64 = 0.1;
const WMA_DAMPING_PER_STEP: f64 = 0.05;
const WMA_STD_DEV: f64 = 0.5;
const WMA_R2: f64 = 0.85;
const ETS_STD_DEV: f64 = 0.6;
const ETS_R2: f64 = 0.88;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    #[default]
    Linear,
    Wma,
    Ets,
}

impl ModelType {
    /// Lenient lookup: anything unrecognized is `Linear`.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "wma" => ModelType::Wma,
            "ets" => ModelType::Ets,
            _ => ModelType::Linear,
        }
    }

    pub fn is_known_name(name: &str) -> bool {
        matches!(name.trim().to_lowercase().as_str(), "linear" | "wma" | "ets")
    }

    pub fn all() -> [ModelType; 3] {
        [ModelType::Linear, ModelType::Wma, ModelType::Ets]
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelType::Linear => "linear",
            ModelType::Wma => "wma",
            ModelType::Ets => "ets",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPoint {
    pub date: NaiveDate,
    #[serde(serialize_with = "crate::domain::decimal::fixed2")]
    pub predicted: f64,
    #[serde(serialize_with = "crate::domain::decimal::fixed2")]
    pub lower: f64,
    #[serde(serialize_with = "crate::domain::decimal::fixed2")]
    pub upper: f64,
    pub is_forecast: bool,
}

impl ForecastPoint {
    /// Prices cannot go negative; every value is clamped at zero and
    /// quantized to cents.
    fn new(date: NaiveDate, predicted: f64, lower: f64, upper: f64) -> Self {
        Self {
            date,
            predicted: round_cents(predicted.max(0.0)),
            lower: round_cents(lower.max(0.0)),
            upper: round_cents(upper.max(0.0)),
            is_forecast: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub forecast: Vec<ForecastPoint>,
    pub metrics: Metrics,
}

impl ForecastResult {
    pub fn degenerate() -> Self {
        Self {
            forecast: Vec::new(),
            metrics: Metrics::degenerate(),
        }
    }
}

/// What to forecast; assembled from config and flags by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    pub series: String,
    pub forecast_days: usize,
    pub model: ModelType,
    pub range: DateRange,
}

impl ForecastRequest {
    pub fn new(series: impl Into<String>) -> Self {
        Self {
            series: series.into(),
            forecast_days: DEFAULT_FORECAST_DAYS,
            model: ModelType::default(),
            range: DateRange::all(),
        }
    }
}

/// Slope, r2 and points produced by one model.
struct Projection {
    slope: f64,
    r2: f64,
    points: Vec<ForecastPoint>,
}

pub fn generate_forecast(
    history: &[Observation],
    forecast_days: usize,
    model: ModelType,
) -> ForecastResult {
    if history.len() < 2 {
        return ForecastResult::degenerate();
    }

    tracing::debug!(model = %model, points = history.len(), forecast_days, "projecting");

    let projection = match model {
        ModelType::Linear => project_linear(history, forecast_days),
        ModelType::Wma => project_wma(history, forecast_days),
        ModelType::Ets => project_ets(history, forecast_days),
    };

    let metrics = Metrics::summarize(history, projection.slope, projection.r2, &projection.points);
    ForecastResult {
        forecast: projection.points,
        metrics,
    }
}

fn forecast_date(last: NaiveDate, step: usize) -> NaiveDate {
    last.checked_add_days(Days::new(step as u64 + 1))
        .unwrap_or(NaiveDate::MAX)
}

fn last_date(history: &[Observation]) -> NaiveDate {
    history.last().map(|o| o.date).unwrap_or(NaiveDate::MIN)
}

fn project_linear(history: &[Observation], forecast_days: usize) -> Projection {
    let n = history.len() as f64;
    let fit = linear_regression(history);
    let std_dev = residual_std_dev(history, &fit).unwrap_or(LINEAR_MIN_STD_DEV);
    let last = last_date(history);

    let points = (0..forecast_days)
        .map(|i| {
            let x = n + i as f64;
            let predicted = fit.predict(x);
            // Kept as published: the distance term divides by n·σ rather
            // than Σ(x − x̄)², so the band differs from a textbook
            // prediction interval.
            let multiplier =
                Z_95 * (1.0 + 1.0 / n + (x - n / 2.0).powi(2) / (n * std_dev)).sqrt();
            let half_width = multiplier * std_dev;
            ForecastPoint::new(
                forecast_date(last, i),
                predicted,
                predicted - half_width,
                predicted + half_width,
            )
        })
        .collect();

    Projection {
        slope: fit.slope,
        r2: fit.r2,
        points,
    }
}

fn project_wma(history: &[Observation], forecast_days: usize) -> Projection {
    let smoothed = calculate_wma(history, FORECAST_WMA_WINDOW);
    let n = smoothed.len();
    let last_wma = round_cents(smoothed[n - 1].smoothed);
    let prev_wma = round_cents(smoothed[n - 2].smoothed);
    let trend_step = last_wma - prev_wma;
    let last = last_date(history);
    let half_width = Z_95 * WMA_STD_DEV;

    let points = (0..forecast_days)
        .map(|i| {
            let damping = (1.0 - i as f64 * WMA_DAMPING_PER_STEP).max(0.0);
            let predicted = last_wma + trend_step * (i + 1) as f64 * damping;
            ForecastPoint::new(
                forecast_date(last, i),
                predicted,
                predicted - half_width,
                predicted + half_width,
            )
        })
        .collect();

    Projection {
        slope: trend_step,
        r2: WMA_R2,
        points,
    }
}

fn project_ets(history: &[Observation], forecast_days: usize) -> Projection {
    let smoothed = calculate_ets(history, DEFAULT_ETS_ALPHA);
    let n = smoothed.len();
    let first_level = round_cents(smoothed[0].smoothed);
    let last_level = round_cents(smoothed[n - 1].smoothed);
    let drift = (last_level - first_level) / n as f64;
    let last = last_date(history);
    let half_width = Z_95 * ETS_STD_DEV;

    let points = (0..forecast_days)
        .map(|i| {
            let predicted = last_level + drift * (i + 1) as f64;
            ForecastPoint::new(
                forecast_date(last, i),
                predicted,
                predicted - half_width,
                predicted + half_width,
            )
        })
        .collect();

    Projection {
        slope: drift,
        r2: ETS_R2,
        points,
    }
}
