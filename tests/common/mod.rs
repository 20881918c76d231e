#![allow(dead_code)]

use chrono::NaiveDate;
use pricecast::domain::error::ForecastError;
pub use pricecast::domain::observation::{DateRange, Observation};
use pricecast::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<Observation>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_series(mut self, series: &str, observations: Vec<Observation>) -> Self {
        self.data.insert(series.to_string(), observations);
        self
    }

    pub fn with_error(mut self, series: &str, reason: &str) -> Self {
        self.errors.insert(series.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_prices(
        &self,
        series: &str,
        range: DateRange,
    ) -> Result<Vec<Observation>, ForecastError> {
        if let Some(reason) = self.errors.get(series) {
            return Err(ForecastError::data_source(reason.clone()));
        }
        Ok(self
            .data
            .get(series)
            .map(|obs| obs.iter().filter(|o| range.contains(o.date)).cloned().collect())
            .unwrap_or_default())
    }

    fn list_series(&self) -> Result<Vec<String>, ForecastError> {
        let mut names: Vec<String> = self.data.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    fn get_data_range(
        &self,
        series: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ForecastError> {
        if let Some(reason) = self.errors.get(series) {
            return Err(ForecastError::data_source(reason.clone()));
        }
        match self.data.get(series) {
            Some(obs) if !obs.is_empty() => {
                let min = obs.iter().map(|o| o.date).min().unwrap();
                let max = obs.iter().map(|o| o.date).max().unwrap();
                Ok(Some((min, max, obs.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_obs(date_str: &str, price: f64) -> Observation {
    Observation::new(
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap(),
        price,
    )
}

/// Consecutive daily observations starting at `start`.
pub fn daily_series(start: &str, prices: &[f64]) -> Vec<Observation> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| Observation::new(start + chrono::Duration::days(i as i64), p))
        .collect()
}

/// `len` days of a gentle uptrend with a small weekly wobble.
pub fn generate_series(start: &str, len: usize, base: f64) -> Vec<Observation> {
    let prices: Vec<f64> = (0..len)
        .map(|i| {
            let wobble = [0.00, 0.02, -0.01, 0.01, -0.02, 0.03, 0.00][i % 7];
            ((base + 0.02 * i as f64 + wobble) * 100.0).round() / 100.0
        })
        .collect();
    daily_series(start, &prices)
}
