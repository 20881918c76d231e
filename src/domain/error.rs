//! Domain error types.
//!
//! The forecasting engine itself never fails; these errors come from the
//! collaborators around it (config, data sources, report writers).

/// Top-level error type for pricecast.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("malformed record at line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("no data for series {series}")]
    NoData { series: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ForecastError {
    pub fn config_invalid(section: &str, key: &str, reason: impl Into<String>) -> Self {
        ForecastError::ConfigInvalid {
            section: section.to_string(),
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub fn data_source(reason: impl Into<String>) -> Self {
        ForecastError::DataSource {
            reason: reason.into(),
        }
    }
}

impl From<&ForecastError> for std::process::ExitCode {
    fn from(err: &ForecastError) -> Self {
        let code: u8 = match err {
            ForecastError::Io(_) | ForecastError::Report { .. } => 1,
            ForecastError::ConfigParse { .. }
            | ForecastError::ConfigMissing { .. }
            | ForecastError::ConfigInvalid { .. } => 2,
            ForecastError::DataSource { .. } | ForecastError::MalformedRecord { .. } => 3,
            ForecastError::NoData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_invalid_message() {
        let err = ForecastError::config_invalid("forecast", "days", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid config value [forecast] days: must be positive"
        );
    }

    #[test]
    fn malformed_record_message() {
        let err = ForecastError::MalformedRecord {
            line: 4,
            reason: "invalid price 'abc'".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed record at line 4: invalid price 'abc'"
        );
    }

    #[test]
    fn io_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = ForecastError::from(io);
        assert_eq!(err.to_string(), "gone");
    }
}
