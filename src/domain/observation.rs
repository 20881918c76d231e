//! Price observation representation.

use chrono::NaiveDate;
use serde::Serialize;

/// One dated price. Historical input is an ascending sequence of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Observation {
    pub date: NaiveDate,
    #[serde(serialize_with = "crate::domain::decimal::fixed2")]
    pub price: f64,
}

impl Observation {
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }

    /// Parse an ISO-8601 date and a numeric (or quoted numeric) price.
    pub fn parse(date: &str, price: &str) -> Result<Self, String> {
        let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|e| format!("invalid date '{}': {}", date, e))?;
        let price: f64 = price
            .trim()
            .trim_matches('"')
            .parse()
            .map_err(|_| format!("invalid price '{}'", price))?;
        Ok(Self { date, price })
    }
}

/// Inclusive date window; an open side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// A series name must be a single plain file-name component: no path
/// separators, no `.`/`..`, no NUL.
pub fn is_valid_series_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && !name.contains(['/', '\\', '\0'])
        && !name.contains("..")
}

pub fn prices(data: &[Observation]) -> Vec<f64> {
    data.iter().map(|o| o.price).collect()
}

/// First date, last date and count, or `None` for an empty series.
pub fn data_range(data: &[Observation]) -> Option<(NaiveDate, NaiveDate, usize)> {
    let first = data.iter().map(|o| o.date).min()?;
    let last = data.iter().map(|o| o.date).max()?;
    Some((first, last, data.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn series_names_are_single_components() {
        assert!(is_valid_series_name("Hyderabad"));
        assert!(is_valid_series_name("onion-nashik_2026"));
        assert!(is_valid_series_name("Hyd.v2"));
        assert!(!is_valid_series_name(""));
        assert!(!is_valid_series_name(".."));
        assert!(!is_valid_series_name("../private/secret"));
        assert!(!is_valid_series_name("a/b"));
        assert!(!is_valid_series_name("a\\b"));
        assert!(!is_valid_series_name("x..y"));
        assert!(!is_valid_series_name("nul\0byte"));
    }

    #[test]
    fn prices_extracts_values_in_order() {
        let data = vec![
            Observation::new(date(2026, 1, 1), 5.1),
            Observation::new(date(2026, 1, 2), 5.3),
        ];
        assert_eq!(prices(&data), vec![5.1, 5.3]);
    }

    #[test]
    fn parse_numeric_string_price() {
        let obs = Observation::parse("2026-01-01", "5.10").unwrap();
        assert_eq!(obs.date, date(2026, 1, 1));
        assert!((obs.price - 5.1).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_quoted_price() {
        let obs = Observation::parse(" 2026-01-02 ", "\"5.20\"").unwrap();
        assert_eq!(obs.date, date(2026, 1, 2));
        assert!((obs.price - 5.2).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_rejects_bad_date() {
        let err = Observation::parse("01/02/2026", "5.0").unwrap_err();
        assert!(err.contains("invalid date"));
    }

    #[test]
    fn parse_rejects_bad_price() {
        let err = Observation::parse("2026-01-02", "n/a").unwrap_err();
        assert_eq!(err, "invalid price 'n/a'");
    }

    #[test]
    fn date_range_open_bounds() {
        let range = DateRange::all();
        assert!(range.contains(date(1999, 1, 1)));

        let range = DateRange {
            start: Some(date(2026, 1, 10)),
            end: None,
        };
        assert!(!range.contains(date(2026, 1, 9)));
        assert!(range.contains(date(2026, 1, 10)));
        assert!(range.contains(date(2030, 1, 1)));
    }

    #[test]
    fn date_range_is_inclusive() {
        let range = DateRange::between(date(2026, 1, 1), date(2026, 1, 3));
        assert!(range.contains(date(2026, 1, 1)));
        assert!(range.contains(date(2026, 1, 3)));
        assert!(!range.contains(date(2026, 1, 4)));
    }

    #[test]
    fn data_range_of_series() {
        let data = vec![
            Observation::new(date(2026, 1, 1), 5.0),
            Observation::new(date(2026, 1, 5), 5.2),
        ];
        assert_eq!(
            data_range(&data),
            Some((date(2026, 1, 1), date(2026, 1, 5), 2))
        );
        assert_eq!(data_range(&[]), None);
    }

    #[test]
    fn serializes_price_as_fixed_string() {
        let obs = Observation::new(date(2026, 1, 1), 5.1);
        let json = serde_json::to_string(&obs).unwrap();
        assert_eq!(json, r#"{"date":"2026-01-01","price":"5.10"}"#);
    }
}
