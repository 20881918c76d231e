//! Weekly pattern detection on raw history.
//!
//! Prices are grouped by weekday; a weekly pattern is reported when some
//! weekday's average strays more than 2% from the overall mean.

use chrono::{Datelike, Weekday};
use serde::Serialize;
use std::fmt;

use crate::domain::metrics::mean;
use crate::domain::observation::{prices, Observation};

pub const MIN_SEASONALITY_POINTS: usize = 30;
const WEEKLY_DEVIATION_THRESHOLD: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeasonalPattern {
    Weekly,
    None,
    InsufficientData,
}

impl fmt::Display for SeasonalPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeasonalPattern::Weekly => "weekly",
            SeasonalPattern::None => "none",
            SeasonalPattern::InsufficientData => "insufficient data",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayAverage {
    #[serde(serialize_with = "serialize_weekday")]
    pub weekday: Weekday,
    #[serde(serialize_with = "crate::domain::decimal::fixed2")]
    pub average: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalityReport {
    pub has_seasonality: bool,
    pub pattern: SeasonalPattern,
    /// Sunday first; weekdays with no observations are omitted.
    pub day_averages: Vec<DayAverage>,
}

pub fn detect_seasonality(data: &[Observation]) -> SeasonalityReport {
    if data.len() < MIN_SEASONALITY_POINTS {
        return SeasonalityReport {
            has_seasonality: false,
            pattern: SeasonalPattern::InsufficientData,
            day_averages: Vec::new(),
        };
    }

    let mut buckets: [Vec<f64>; 7] = Default::default();
    for obs in data {
        buckets[obs.date.weekday().num_days_from_sunday() as usize].push(obs.price);
    }

    let day_averages: Vec<DayAverage> = buckets
        .iter()
        .enumerate()
        .filter(|(_, prices)| !prices.is_empty())
        .map(|(day, prices)| DayAverage {
            weekday: weekday_from_sunday(day),
            average: mean(prices),
            samples: prices.len(),
        })
        .collect();

    let overall = mean(&prices(data));
    let max_deviation = day_averages
        .iter()
        .map(|d| (d.average - overall).abs())
        .fold(0.0_f64, f64::max);

    let has_weekly = overall != 0.0 && max_deviation / overall > WEEKLY_DEVIATION_THRESHOLD;

    SeasonalityReport {
        has_seasonality: has_weekly,
        pattern: if has_weekly {
            SeasonalPattern::Weekly
        } else {
            SeasonalPattern::None
        },
        day_averages,
    }
}

fn weekday_from_sunday(day: usize) -> Weekday {
    match day {
        0 => Weekday::Sun,
        1 => Weekday::Mon,
        2 => Weekday::Tue,
        3 => Weekday::Wed,
        4 => Weekday::Thu,
        5 => Weekday::Fri,
        _ => Weekday::Sat,
    }
}

fn serialize_weekday<S: serde::Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&day.to_string())
}
