//! JSON report adapter.
//!
//! Pretty-printed JSON; prices, slope, volatility and confidence are
//! rendered as fixed-decimal strings by the domain serializers.

use crate::domain::error::ForecastError;
use crate::ports::report_port::{ForecastReport, ReportPort};
use std::fs;
use std::path::Path;

#[derive(Debug, Default)]
pub struct JsonReportAdapter;

impl JsonReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl ReportPort for JsonReportAdapter {
    fn write(&self, report: &ForecastReport, output_path: &Path) -> Result<(), ForecastError> {
        let body = self.render(report)?;
        fs::write(output_path, body).map_err(|e| ForecastError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })
    }

    fn render(&self, report: &ForecastReport) -> Result<String, ForecastError> {
        let mut body = serde_json::to_string_pretty(report).map_err(|e| ForecastError::Report {
            reason: format!("failed to serialize report: {}", e),
        })?;
        body.push('\n');
        Ok(body)
    }
}
