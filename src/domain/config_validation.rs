//! Configuration validation.
//!
//! Validates every config field before any data is read. An unrecognized
//! model name is not an error: the engine falls back to linear, so it only
//! warns.

use crate::domain::error::ForecastError;
use crate::domain::forecast::ModelType;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DATA_SOURCES: [&str; 2] = ["csv", "simulated"];
pub const FALLBACKS: [&str; 2] = ["none", "simulated"];
pub const OUTPUT_FORMATS: [&str; 2] = ["json", "csv"];

pub fn validate_forecast_config(config: &dyn ConfigPort) -> Result<(), ForecastError> {
    validate_days(config)?;
    validate_model(config);
    validate_range(config, "forecast", "start_date", "end_date")?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), ForecastError> {
    let source = validate_choice(config, "data", "source", &DATA_SOURCES, "csv")?;
    if source == "csv" {
        match config.get_string("data", "csv_dir") {
            Some(s) if !s.trim().is_empty() => {}
            _ => {
                return Err(ForecastError::ConfigMissing {
                    section: "data".to_string(),
                    key: "csv_dir".to_string(),
                })
            }
        }
    }
    validate_choice(config, "data", "fallback", &FALLBACKS, "none")?;
    validate_seed(config)?;
    validate_range(config, "data", "simulation_start", "simulation_end")?;
    Ok(())
}

pub fn validate_output_config(config: &dyn ConfigPort) -> Result<(), ForecastError> {
    validate_choice(config, "output", "format", &OUTPUT_FORMATS, "json")?;
    Ok(())
}

pub fn validate_all(config: &dyn ConfigPort) -> Result<(), ForecastError> {
    validate_forecast_config(config)?;
    validate_data_config(config)?;
    validate_output_config(config)?;
    Ok(())
}

fn validate_days(config: &dyn ConfigPort) -> Result<(), ForecastError> {
    let Some(raw) = config.get_string("forecast", "days") else {
        return Ok(());
    };
    match raw.trim().parse::<i64>() {
        Ok(days) if days >= 1 => Ok(()),
        Ok(_) => Err(ForecastError::config_invalid(
            "forecast",
            "days",
            "days must be at least 1",
        )),
        Err(_) => Err(ForecastError::config_invalid(
            "forecast",
            "days",
            format!("'{}' is not an integer", raw.trim()),
        )),
    }
}

fn validate_model(config: &dyn ConfigPort) {
    if let Some(name) = config.get_string("forecast", "model")
        && !ModelType::is_known_name(&name)
    {
        tracing::warn!(model = %name, "unknown model, falling back to linear");
    }
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), ForecastError> {
    if let Some(raw) = config.get_string("data", "simulation_seed")
        && raw.trim().parse::<u64>().is_err()
    {
        return Err(ForecastError::config_invalid(
            "data",
            "simulation_seed",
            "simulation_seed must be a non-negative integer",
        ));
    }
    Ok(())
}

fn validate_choice(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    allowed: &[&str],
    default: &str,
) -> Result<String, ForecastError> {
    let value = config
        .get_string(section, key)
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| default.to_string());
    if allowed.contains(&value.as_str()) {
        Ok(value)
    } else {
        Err(ForecastError::config_invalid(
            section,
            key,
            format!("expected one of {}", allowed.join(", ")),
        ))
    }
}

fn validate_range(
    config: &dyn ConfigPort,
    section: &str,
    start_key: &str,
    end_key: &str,
) -> Result<(), ForecastError> {
    let start = parse_optional_date(config, section, start_key)?;
    let end = parse_optional_date(config, section, end_key)?;
    if let (Some(start), Some(end)) = (start, end)
        && start >= end
    {
        return Err(ForecastError::config_invalid(
            section,
            start_key,
            format!("{} must be before {}", start_key, end_key),
        ));
    }
    Ok(())
}

/// Absent keys are `None`; present keys must be YYYY-MM-DD.
pub fn parse_optional_date(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<NaiveDate>, ForecastError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                ForecastError::config_invalid(
                    section,
                    key,
                    format!("invalid {} format, expected YYYY-MM-DD", key),
                )
            }),
    }
}
