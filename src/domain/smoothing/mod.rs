//! Price smoothing utilities.
//!
//! This module provides:
//! - `SmoothedPoint`: one observation with its smoothed price
//! - `SmoothingMethod`: smoother identity + parameters
//! - [`smooth`]: dispatch to the SMA, WMA or ETS implementation
//!
//! All smoothers emit one point per input observation; the window is
//! truncated at the start of the series instead of leaving a warmup gap.

pub mod ets;
pub mod sma;
pub mod wma;

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::domain::observation::Observation;

pub use ets::calculate_ets;
pub use sma::calculate_sma;
pub use wma::calculate_wma;

pub const DEFAULT_SMA_WINDOW: usize = 7;
pub const DEFAULT_WMA_WINDOW: usize = 7;
pub const FORECAST_WMA_WINDOW: usize = 14;
pub const DEFAULT_ETS_ALPHA: f64 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmoothedPoint {
    pub date: NaiveDate,
    #[serde(serialize_with = "crate::domain::decimal::fixed2")]
    pub price: f64,
    #[serde(
        rename = "smoothedPrice",
        serialize_with = "crate::domain::decimal::fixed2"
    )]
    pub smoothed: f64,
}

impl SmoothedPoint {
    pub(crate) fn from_observation(obs: &Observation, smoothed: f64) -> Self {
        Self {
            date: obs.date,
            price: obs.price,
            smoothed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SmoothingMethod {
    Sma(usize),
    Wma(usize),
    Ets { alpha: f64 },
}

impl SmoothingMethod {
    pub fn ets(alpha: f64) -> Self {
        SmoothingMethod::Ets { alpha }
    }

    /// Resolve a method name with the general-purpose defaults.
    /// `window` applies to SMA/WMA, `alpha` to ETS.
    pub fn from_name(name: &str, window: Option<usize>, alpha: Option<f64>) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "sma" | "ma" => Some(SmoothingMethod::Sma(window.unwrap_or(DEFAULT_SMA_WINDOW))),
            "wma" => Some(SmoothingMethod::Wma(window.unwrap_or(DEFAULT_WMA_WINDOW))),
            "ets" | "ses" => Some(SmoothingMethod::ets(alpha.unwrap_or(DEFAULT_ETS_ALPHA))),
            _ => None,
        }
    }
}

impl fmt::Display for SmoothingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmoothingMethod::Sma(window) => write!(f, "SMA({})", window),
            SmoothingMethod::Wma(window) => write!(f, "WMA({})", window),
            SmoothingMethod::Ets { alpha } => write!(f, "ETS({})", alpha),
        }
    }
}

pub fn smooth(data: &[Observation], method: SmoothingMethod) -> Vec<SmoothedPoint> {
    match method {
        SmoothingMethod::Sma(window) => calculate_sma(data, window),
        SmoothingMethod::Wma(window) => calculate_wma(data, window),
        SmoothingMethod::Ets { alpha } => calculate_ets(data, alpha),
    }
}
