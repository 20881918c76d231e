//! CSV file data adapter.
//!
//! One file per series: `<base_path>/<series>.csv` with a `date,price`
//! header. Prices may be quoted.

use crate::domain::error::ForecastError;
use crate::domain::observation::{data_range, is_valid_series_name, DateRange, Observation};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, series: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", series))
    }

    fn read_all(&self, series: &str) -> Result<Vec<Observation>, ForecastError> {
        if !is_valid_series_name(series) {
            tracing::warn!(series, "rejected series name outside the data directory");
            return Err(ForecastError::NoData {
                series: series.to_string(),
            });
        }
        let path = self.csv_path(series);
        if !path.exists() {
            return Err(ForecastError::NoData {
                series: series.to_string(),
            });
        }
        let content = fs::read_to_string(&path).map_err(|e| {
            ForecastError::data_source(format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());
        let mut observations = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| ForecastError::MalformedRecord {
                line: e.position().map(|p| p.line()).unwrap_or(0),
                reason: e.to_string(),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date = record.get(0).ok_or_else(|| ForecastError::MalformedRecord {
                line,
                reason: "missing date column".into(),
            })?;
            let price = record.get(1).ok_or_else(|| ForecastError::MalformedRecord {
                line,
                reason: "missing price column".into(),
            })?;

            let obs = Observation::parse(date, price)
                .map_err(|reason| ForecastError::MalformedRecord { line, reason })?;
            observations.push(obs);
        }

        observations.sort_by_key(|o| o.date);
        Ok(observations)
    }
}

impl DataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        series: &str,
        range: DateRange,
    ) -> Result<Vec<Observation>, ForecastError> {
        let mut observations = self.read_all(series)?;
        observations.retain(|o| range.contains(o.date));
        tracing::debug!(series, count = observations.len(), "loaded csv series");
        Ok(observations)
    }

    fn list_series(&self) -> Result<Vec<String>, ForecastError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| {
            ForecastError::data_source(format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut series = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                ForecastError::data_source(format!("directory entry error: {}", e))
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            if let Some(stem) = name_str.strip_suffix(".csv") {
                series.push(stem.to_string());
            }
        }

        series.sort();
        Ok(series)
    }

    fn get_data_range(
        &self,
        series: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, ForecastError> {
        match self.read_all(series) {
            Ok(observations) => Ok(data_range(&observations)),
            Err(ForecastError::NoData { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        // deliberately out of order, one quoted price
        let csv_content = "date,price\n\
            2026-01-03,5.40\n\
            2026-01-01,5.10\n\
            2026-01-02,\"5.25\"\n";

        fs::write(path.join("Hyderabad.csv"), csv_content).unwrap();
        fs::write(path.join("Warangal.csv"), "date,price\n").unwrap();
        fs::write(path.join("notes.txt"), "ignore me").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_prices_returns_sorted_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let data = adapter.fetch_prices("Hyderabad", DateRange::all()).unwrap();

        assert_eq!(data.len(), 3);
        assert_eq!(data[0].date, date(2026, 1, 1));
        assert_eq!(data[0].price, 5.10);
        assert_eq!(data[1].price, 5.25);
        assert_eq!(data[2].date, date(2026, 1, 3));
    }

    #[test]
    fn fetch_prices_filters_by_range() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let range = DateRange::between(date(2026, 1, 2), date(2026, 1, 2));
        let data = adapter.fetch_prices("Hyderabad", range).unwrap();

        assert_eq!(data.len(), 1);
        assert_eq!(data[0].date, date(2026, 1, 2));
    }

    #[test]
    fn fetch_prices_missing_file_is_no_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_prices("Nowhere", DateRange::all()).unwrap_err();
        assert!(matches!(err, ForecastError::NoData { series } if series == "Nowhere"));
    }

    #[test]
    fn series_name_cannot_escape_base_dir() {
        let root = TempDir::new().unwrap();
        let data = root.path().join("data");
        let private = root.path().join("private");
        fs::create_dir_all(&data).unwrap();
        fs::create_dir_all(&private).unwrap();
        fs::write(private.join("secret.csv"), "date,price\ntop-secret-token,1\n").unwrap();
        let adapter = CsvAdapter::new(data);

        let err = adapter
            .fetch_prices("../private/secret", DateRange::all())
            .unwrap_err();
        assert!(matches!(err, ForecastError::NoData { .. }));
        assert!(!err.to_string().contains("top-secret-token"));
        assert_eq!(adapter.get_data_range("../private/secret").unwrap(), None);
    }

    #[test]
    fn malformed_price_reports_line() {
        let (_dir, path) = setup_test_data();
        fs::write(
            path.join("Broken.csv"),
            "date,price\n2026-01-01,5.10\n2026-01-02,abc\n",
        )
        .unwrap();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_prices("Broken", DateRange::all()).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedRecord { line: 3, .. }));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let (_dir, path) = setup_test_data();
        fs::write(path.join("Broken.csv"), "date,price\n01/02/2026,5.10\n").unwrap();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_prices("Broken", DateRange::all()).unwrap_err();
        assert!(matches!(err, ForecastError::MalformedRecord { .. }));
    }

    #[test]
    fn list_series_returns_csv_stems() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        assert_eq!(adapter.list_series().unwrap(), vec!["Hyderabad", "Warangal"]);
    }

    #[test]
    fn list_series_missing_dir_fails() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/pricecast/data"));
        assert!(matches!(
            adapter.list_series().unwrap_err(),
            ForecastError::DataSource { .. }
        ));
    }

    #[test]
    fn data_range_reports_bounds() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        assert_eq!(
            adapter.get_data_range("Hyderabad").unwrap(),
            Some((date(2026, 1, 1), date(2026, 1, 3), 3))
        );
        assert_eq!(adapter.get_data_range("Warangal").unwrap(), None);
        assert_eq!(adapter.get_data_range("Nowhere").unwrap(), None);
    }
}
