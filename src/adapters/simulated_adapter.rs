//! Randomized price source.
//!
//! Emits one observation per day with a price drawn uniformly from
//! [5.00, 5.80), rounded to cents. Used when no real data is available;
//! a fixed seed makes the output reproducible.

use crate::domain::decimal::round_cents;
use crate::domain::error::ForecastError;
use crate::domain::observation::{DateRange, Observation};
use crate::ports::data_port::DataPort;
use chrono::{Days, Local, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const BASE_PRICE: f64 = 5.0;
const PRICE_SPREAD: f64 = 0.8;
const DEFAULT_WINDOW_DAYS: u64 = 90;

pub struct SimulatedAdapter {
    start: NaiveDate,
    end: NaiveDate,
    seed: Option<u64>,
    series: Vec<String>,
}

impl SimulatedAdapter {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            seed: None,
            series: Vec::new(),
        }
    }

    /// The 90 days ending today.
    pub fn recent() -> Self {
        let end = Local::now().date_naive();
        let start = end.checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS)).unwrap_or(end);
        Self::new(start, end)
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Names reported by `list_series`; any name can still be fetched.
    pub fn with_series(mut self, series: Vec<String>) -> Self {
        self.series = series;
        self
    }

    fn rng_for(&self, series: &str) -> StdRng {
        match self.seed {
            // Mix the name in so each series gets its own stream.
            Some(seed) => {
                let salt = series
                    .bytes()
                    .fold(0xcbf2_9ce4_8422_2325_u64, |h, b| {
                        (h ^ b as u64).wrapping_mul(0x0100_0000_01b3)
                    });
                StdRng::seed_from_u64(seed ^ salt)
            }
            None => StdRng::from_entropy(),
        }
    }
}

impl DataPort for SimulatedAdapter {
    fn fetch_prices(
        &self,
        series: &str,
        range: DateRange,
    ) -> Result<Vec<Observation>, ForecastError> {
        let mut rng = self.rng_for(series);
        let mut observations = Vec::new();

        for date in self.start.iter_days().take_while(|d| *d <= self.end) {
            // Draw for every day so a narrower range sees the same prices.
            let price = round_cents(BASE_PRICE + rng.gen_range(0.0..PRICE_SPREAD));
            if range.contains(date) {
                observations.push(Observation::new(date, price));
            }
        }

        tracing::debug!(series, count = observations.len(), "generated simulated series");
        Ok(observations)
    }

    fn list_series(&self) -> Result<Vec<String>, ForecastError> {
        Ok(self.series.clone())
    }

    fn get_data_range(
        &self,
        _series: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ForecastError> {
        if self.start > self.end {
            return Ok(None);
        }
        let count = (self.end - self.start).num_days() as usize + 1;
        Ok(Some((self.start, self.end, count)))
    }
}
