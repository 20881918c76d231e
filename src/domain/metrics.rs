//! Forecast summary metrics.
//!
//! Trend comes from the model's slope, volatility from the raw history
//! (never the modelled line), headline values from the forecast itself.

use serde::Serialize;
use std::fmt;

use crate::domain::forecast::ForecastPoint;
use crate::domain::observation::{prices, Observation};

/// Slope magnitude (per observation step) below which a series is stable.
const TREND_THRESHOLD: f64 = 0.01;
const NEXT_WEEK_INDEX: usize = 6;
const NEXT_MONTH_INDEX: usize = 29;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
    /// Not enough history to say anything.
    Neutral,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Trend::Rising => "rising",
            Trend::Falling => "falling",
            Trend::Stable => "stable",
            Trend::Neutral => "neutral",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub trend: Trend,
    #[serde(serialize_with = "crate::domain::decimal::fixed4")]
    pub slope_per_day: f64,
    /// Coefficient of variation of the raw prices, in percent.
    #[serde(serialize_with = "crate::domain::decimal::fixed1")]
    pub volatility: f64,
    /// r2 as a percentage in [0, 100].
    #[serde(serialize_with = "crate::domain::decimal::fixed0")]
    pub confidence: f64,
    #[serde(serialize_with = "crate::domain::decimal::fixed2")]
    pub avg_price: f64,
    #[serde(serialize_with = "crate::domain::decimal::fixed2")]
    pub predicted_next_week: f64,
    #[serde(serialize_with = "crate::domain::decimal::fixed2")]
    pub predicted_next_month: f64,
}

impl Metrics {
    pub fn summarize(
        history: &[Observation],
        slope: f64,
        r2: f64,
        forecast: &[ForecastPoint],
    ) -> Self {
        let prices = prices(history);

        let predicted_next_week = forecast
            .get(NEXT_WEEK_INDEX)
            .map(|p| p.predicted)
            .unwrap_or(0.0);
        let predicted_next_month = forecast
            .get(NEXT_MONTH_INDEX)
            .or_else(|| forecast.last())
            .map(|p| p.predicted)
            .unwrap_or(0.0);

        Metrics {
            trend: classify_trend(slope),
            slope_per_day: slope,
            volatility: coefficient_of_variation(&prices),
            confidence: (r2 * 100.0).clamp(0.0, 100.0),
            avg_price: mean(&prices),
            predicted_next_week,
            predicted_next_month,
        }
    }

    /// Result for input too short to model.
    pub fn degenerate() -> Self {
        Metrics {
            trend: Trend::Neutral,
            slope_per_day: 0.0,
            volatility: 0.0,
            confidence: 0.0,
            avg_price: 0.0,
            predicted_next_week: 0.0,
            predicted_next_month: 0.0,
        }
    }
}

pub fn classify_trend(slope: f64) -> Trend {
    if slope > TREND_THRESHOLD {
        Trend::Rising
    } else if slope < -TREND_THRESHOLD {
        Trend::Falling
    } else {
        Trend::Stable
    }
}

/// Population standard deviation over mean, × 100.
pub fn coefficient_of_variation(prices: &[f64]) -> f64 {
    let avg = mean(prices);
    if prices.is_empty() || avg == 0.0 {
        return 0.0;
    }
    let variance =
        prices.iter().map(|p| (p - avg).powi(2)).sum::<f64>() / prices.len() as f64;
    let cv = variance.sqrt() / avg * 100.0;
    if cv.is_finite() { cv.abs() } else { 0.0 }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
