//! CSV report adapter: one row per forecast point.

use crate::domain::decimal::fixed;
use crate::domain::error::ForecastError;
use crate::ports::report_port::{ForecastReport, ReportPort};
use std::fs;
use std::path::Path;

const HEADER: [&str; 4] = ["date", "predicted", "lower", "upper"];

#[derive(Debug, Default)]
pub struct CsvReportAdapter;

impl CsvReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

fn report_error(e: impl std::fmt::Display) -> ForecastError {
    ForecastError::Report {
        reason: format!("failed to build csv report: {}", e),
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &ForecastReport, output_path: &Path) -> Result<(), ForecastError> {
        let body = self.render(report)?;
        fs::write(output_path, body).map_err(|e| ForecastError::Report {
            reason: format!("failed to write {}: {}", output_path.display(), e),
        })
    }

    fn render(&self, report: &ForecastReport) -> Result<String, ForecastError> {
        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(HEADER).map_err(report_error)?;
        for point in &report.result.forecast {
            wtr.write_record([
                point.date.to_string(),
                fixed(point.predicted, 2),
                fixed(point.lower, 2),
                fixed(point.upper, 2),
            ])
            .map_err(report_error)?;
        }
        let bytes = wtr.into_inner().map_err(report_error)?;
        String::from_utf8(bytes).map_err(report_error)
    }
}
