//! Primary/secondary data source chain.

use crate::domain::error::ForecastError;
use crate::domain::observation::{DateRange, Observation};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;

/// Reads from `primary`; on failure or an empty result, logs a warning and
/// serves from `secondary` instead.
pub struct FallbackAdapter {
    primary: Box<dyn DataPort + Send + Sync>,
    secondary: Box<dyn DataPort + Send + Sync>,
}

impl FallbackAdapter {
    pub fn new(
        primary: Box<dyn DataPort + Send + Sync>,
        secondary: Box<dyn DataPort + Send + Sync>,
    ) -> Self {
        Self { primary, secondary }
    }
}

impl DataPort for FallbackAdapter {
    fn fetch_prices(
        &self,
        series: &str,
        range: DateRange,
    ) -> Result<Vec<Observation>, ForecastError> {
        match self.primary.fetch_prices(series, range) {
            Ok(data) if !data.is_empty() => Ok(data),
            Ok(_) => {
                tracing::warn!(series, "primary source returned no data, using fallback");
                self.secondary.fetch_prices(series, range)
            }
            Err(e) => {
                tracing::warn!(series, error = %e, "primary source failed, using fallback");
                self.secondary.fetch_prices(series, range)
            }
        }
    }

    fn list_series(&self) -> Result<Vec<String>, ForecastError> {
        match self.primary.list_series() {
            Ok(series) if !series.is_empty() => Ok(series),
            Ok(_) => self.secondary.list_series(),
            Err(e) => {
                tracing::warn!(error = %e, "primary source listing failed, using fallback");
                self.secondary.list_series()
            }
        }
    }

    fn get_data_range(
        &self,
        series: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ForecastError> {
        match self.primary.get_data_range(series) {
            Ok(Some(range)) => Ok(Some(range)),
            Ok(None) => self.secondary.get_data_range(series),
            Err(e) => {
                tracing::warn!(series, error = %e, "primary source failed, using fallback");
                self.secondary.get_data_range(series)
            }
        }
    }
}
