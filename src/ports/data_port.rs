//! Data access port trait.
//!
//! Any source of dated prices (files, a scraper, a simulator) sits behind
//! this trait so the forecasting engine never touches I/O.

use crate::domain::error::ForecastError;
use crate::domain::observation::{DateRange, Observation};
use chrono::NaiveDate;

pub trait DataPort {
    /// Observations for `series` inside `range`, ascending by date.
    fn fetch_prices(
        &self,
        series: &str,
        range: DateRange,
    ) -> Result<Vec<Observation>, ForecastError>;

    fn list_series(&self) -> Result<Vec<String>, ForecastError>;

    /// First date, last date and observation count.
    fn get_data_range(
        &self,
        series: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ForecastError>;
}
