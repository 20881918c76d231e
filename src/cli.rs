//! CLI definition and dispatch.
//!
//! Precedence for every setting: command-line flag, then config file, then
//! built-in default. Console summaries go to stderr; report payloads go to
//! stdout unless an output path is given.

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::fallback_adapter::FallbackAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::simulated_adapter::SimulatedAdapter;
use crate::domain::config_validation::{
    parse_optional_date, validate_all, validate_forecast_config, validate_output_config,
    DATA_SOURCES, FALLBACKS,
};
use crate::domain::decimal::fixed;
use crate::domain::error::ForecastError;
use crate::domain::forecast::{ForecastRequest, ModelType, DEFAULT_FORECAST_DAYS};
use crate::domain::observation::{DateRange, Observation};
use crate::domain::seasonality::{detect_seasonality, SeasonalityReport};
use crate::domain::smoothing::{smooth, SmoothingMethod};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::{ForecastReport, ReportPort};

#[derive(Parser, Debug)]
#[command(name = "pricecast", about = "Daily price forecasting", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where prices come from. Shared by every data-reading subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// INI config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory of <series>.csv files; overrides [data] csv_dir
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
    /// Use simulated prices instead of files
    #[arg(long)]
    pub simulated: bool,
    /// Seed for simulated prices
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Series and date window selection.
#[derive(Args, Debug, Clone, Default)]
pub struct SeriesArgs {
    /// Series name; overrides [forecast] series
    #[arg(short, long)]
    pub series: Option<String>,
    /// First date to include (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// Last date to include (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Forecast a price series
    Forecast {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SeriesArgs,
        /// Horizon in days
        #[arg(short, long)]
        days: Option<usize>,
        /// linear, wma or ets
        #[arg(short, long)]
        model: Option<String>,
        /// Report file; stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// json or csv
        #[arg(short, long)]
        format: Option<String>,
    },
    /// Print a smoothed series
    Smooth {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SeriesArgs,
        /// sma, wma or ets
        #[arg(long, default_value = "sma")]
        method: String,
        #[arg(long)]
        window: Option<usize>,
        #[arg(long)]
        alpha: Option<f64>,
    },
    /// Detect a weekly price pattern
    Seasonality {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        selection: SeriesArgs,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List available series
    ListSeries {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Show data range for series
    Info {
        #[command(flatten)]
        source: SourceArgs,
        #[arg(short, long)]
        series: Option<String>,
    },
    /// Start the web server
    Serve {
        #[command(flatten)]
        source: SourceArgs,
        /// Listen address; overrides [web] listen
        #[arg(long)]
        listen: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Forecast {
            source,
            selection,
            days,
            model,
            output,
            format,
        } => run_forecast(
            &source,
            &selection,
            days,
            model.as_deref(),
            output.as_deref(),
            format.as_deref(),
        ),
        Command::Smooth {
            source,
            selection,
            method,
            window,
            alpha,
        } => run_smooth(&source, &selection, &method, window, alpha),
        Command::Seasonality { source, selection } => run_seasonality(&source, &selection),
        Command::Validate { config } => run_validate(&config),
        Command::ListSeries { source } => run_list_series(&source),
        Command::Info { source, series } => run_info(&source, series.as_deref()),
        Command::Serve { source, listen } => run_serve(&source, listen.as_deref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Without a path every setting falls back to flags and defaults.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, ForecastError> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading config");
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn resolve_series(
    series_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<String, ForecastError> {
    series_override
        .map(str::to_string)
        .or_else(|| config.get_string("forecast", "series"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ForecastError::ConfigMissing {
            section: "forecast".to_string(),
            key: "series".to_string(),
        })
}

fn resolve_range(
    selection: &SeriesArgs,
    config: &dyn ConfigPort,
) -> Result<DateRange, ForecastError> {
    let start = match selection.start {
        Some(d) => Some(d),
        None => parse_optional_date(config, "forecast", "start_date")?,
    };
    let end = match selection.end {
        Some(d) => Some(d),
        None => parse_optional_date(config, "forecast", "end_date")?,
    };
    Ok(DateRange { start, end })
}

/// Assemble a request from flags over `[forecast]` config.
pub fn build_forecast_request(
    config: &dyn ConfigPort,
    selection: &SeriesArgs,
    days_override: Option<usize>,
    model_override: Option<&str>,
) -> Result<ForecastRequest, ForecastError> {
    let mut request = ForecastRequest::new(resolve_series(selection.series.as_deref(), config)?);

    request.forecast_days = match days_override {
        Some(0) => {
            return Err(ForecastError::config_invalid(
                "forecast",
                "days",
                "days must be at least 1",
            ))
        }
        Some(days) => days,
        None => config
            .get_int("forecast", "days", DEFAULT_FORECAST_DAYS as i64)
            .max(1) as usize,
    };

    let model_name = model_override
        .map(str::to_string)
        .or_else(|| config.get_string("forecast", "model"));
    if let Some(name) = &model_name {
        if !ModelType::is_known_name(name) {
            tracing::warn!(model = %name, "unknown model, falling back to linear");
        }
        request.model = ModelType::from_name(name);
    }

    request.range = resolve_range(selection, config)?;
    Ok(request)
}

/// Pick the data source from flags over `[data]` config, wrapping it in a
/// simulated fallback when configured.
pub fn build_data_port(
    config: &dyn ConfigPort,
    source: &SourceArgs,
) -> Result<Box<dyn DataPort + Send + Sync>, ForecastError> {
    let kind = if source.simulated {
        "simulated".to_string()
    } else if source.data_dir.is_some() {
        "csv".to_string()
    } else {
        config
            .get_string("data", "source")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|| "csv".to_string())
    };
    if !DATA_SOURCES.contains(&kind.as_str()) {
        return Err(ForecastError::config_invalid(
            "data",
            "source",
            format!("expected one of {}", DATA_SOURCES.join(", ")),
        ));
    }

    if kind == "simulated" {
        tracing::info!("using simulated prices");
        return Ok(Box::new(build_simulated(config, source)?));
    }

    let dir = source
        .data_dir
        .clone()
        .or_else(|| {
            config
                .get_string("data", "csv_dir")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from)
        })
        .ok_or_else(|| ForecastError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_dir".to_string(),
        })?;
    tracing::info!(dir = %dir.display(), "reading csv series");
    let csv = CsvAdapter::new(dir);

    let fallback = config
        .get_string("data", "fallback")
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_else(|| "none".to_string());
    match fallback.as_str() {
        "none" => Ok(Box::new(csv)),
        "simulated" => Ok(Box::new(FallbackAdapter::new(
            Box::new(csv),
            Box::new(build_simulated(config, source)?),
        ))),
        _ => Err(ForecastError::config_invalid(
            "data",
            "fallback",
            format!("expected one of {}", FALLBACKS.join(", ")),
        )),
    }
}

fn build_simulated(
    config: &dyn ConfigPort,
    source: &SourceArgs,
) -> Result<SimulatedAdapter, ForecastError> {
    let seed = match source.seed {
        Some(seed) => Some(seed),
        None => match config.get_string("data", "simulation_seed") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                ForecastError::config_invalid(
                    "data",
                    "simulation_seed",
                    "simulation_seed must be a non-negative integer",
                )
            })?),
            None => None,
        },
    };

    let start = parse_optional_date(config, "data", "simulation_start")?;
    let end = parse_optional_date(config, "data", "simulation_end")?;
    let adapter = match (start, end) {
        (Some(start), Some(end)) => SimulatedAdapter::new(start, end),
        (Some(start), None) => SimulatedAdapter::new(start, Local::now().date_naive()),
        (None, _) => SimulatedAdapter::recent(),
    };

    Ok(adapter
        .with_seed(seed)
        .with_series(config.get_list("data", "series")))
}

fn fetch_history(
    data_port: &dyn DataPort,
    series: &str,
    range: DateRange,
) -> Result<Vec<Observation>, ForecastError> {
    let history = data_port.fetch_prices(series, range)?;
    if history.is_empty() {
        return Err(ForecastError::NoData {
            series: series.to_string(),
        });
    }
    tracing::info!(series, points = history.len(), "history loaded");
    Ok(history)
}

/// Fetch, forecast and detect seasonality for one request.
pub fn run_forecast_pipeline(
    data_port: &dyn DataPort,
    request: &ForecastRequest,
    generated_on: NaiveDate,
) -> Result<ForecastReport, ForecastError> {
    let history = fetch_history(data_port, &request.series, request.range)?;
    tracing::info!(
        model = %request.model,
        days = request.forecast_days,
        "running forecast"
    );
    Ok(ForecastReport::assemble(request, &history, generated_on))
}

/// `json` or `csv`; unknown names are rejected by config validation.
pub fn report_port_for(format: &str) -> Result<Box<dyn ReportPort>, ForecastError> {
    match format.trim().to_lowercase().as_str() {
        "json" => Ok(Box::new(JsonReportAdapter::new())),
        "csv" => Ok(Box::new(CsvReportAdapter::new())),
        other => Err(ForecastError::config_invalid(
            "output",
            "format",
            format!("unknown format '{}'", other),
        )),
    }
}

pub fn print_summary(report: &ForecastReport) {
    let m = &report.result.metrics;
    eprintln!(
        "\n=== Forecast: {} ({}, {} days) ===",
        report.series, report.model, report.forecast_days
    );
    eprintln!("History:          {} points", report.history_points);
    eprintln!(
        "Trend:            {} ({}/day)",
        m.trend,
        fixed(m.slope_per_day, 4)
    );
    eprintln!("Volatility:       {}%", fixed(m.volatility, 1));
    eprintln!("Confidence:       {}%", fixed(m.confidence, 0));
    eprintln!("Average Price:    {}", fixed(m.avg_price, 2));
    eprintln!("Next Week:        {}", fixed(m.predicted_next_week, 2));
    eprintln!("Next Month:       {}", fixed(m.predicted_next_month, 2));
    print_seasonality_line(&report.seasonality);
}

fn print_seasonality_line(report: &SeasonalityReport) {
    eprintln!("Weekly Pattern:   {}", report.pattern);
}

fn run_forecast(
    source: &SourceArgs,
    selection: &SeriesArgs,
    days: Option<usize>,
    model: Option<&str>,
    output: Option<&Path>,
    format: Option<&str>,
) -> Result<(), ForecastError> {
    let config = load_config(source.config.as_deref())?;
    validate_forecast_config(&config)?;
    validate_output_config(&config)?;

    let request = build_forecast_request(&config, selection, days, model)?;
    let data_port = build_data_port(&config, source)?;
    let report = run_forecast_pipeline(data_port.as_ref(), &request, Local::now().date_naive())?;
    print_summary(&report);

    let format = format
        .map(str::to_string)
        .or_else(|| config.get_string("output", "format"))
        .unwrap_or_else(|| "json".to_string());
    let report_port = report_port_for(&format)?;

    let output = output
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("output", "path").map(PathBuf::from));
    match output {
        Some(path) => {
            report_port.write(&report, &path)?;
            eprintln!("\nReport written to: {}", path.display());
        }
        None => print!("{}", report_port.render(&report)?),
    }
    Ok(())
}

/// Resolve `--method`, `--window` and `--alpha` into a smoother.
pub fn resolve_smoothing_method(
    name: &str,
    window: Option<usize>,
    alpha: Option<f64>,
) -> Result<SmoothingMethod, ForecastError> {
    if window == Some(0) {
        return Err(ForecastError::config_invalid(
            "smooth",
            "window",
            "window must be at least 1",
        ));
    }
    if let Some(a) = alpha
        && !(a > 0.0 && a <= 1.0)
    {
        return Err(ForecastError::config_invalid(
            "smooth",
            "alpha",
            "alpha must be in (0, 1]",
        ));
    }
    SmoothingMethod::from_name(name, window, alpha).ok_or_else(|| {
        ForecastError::config_invalid("smooth", "method", format!("unknown method '{}'", name))
    })
}

fn run_smooth(
    source: &SourceArgs,
    selection: &SeriesArgs,
    method: &str,
    window: Option<usize>,
    alpha: Option<f64>,
) -> Result<(), ForecastError> {
    let method = resolve_smoothing_method(method, window, alpha)?;

    let config = load_config(source.config.as_deref())?;
    let series = resolve_series(selection.series.as_deref(), &config)?;
    let range = resolve_range(selection, &config)?;
    let data_port = build_data_port(&config, source)?;
    let history = fetch_history(data_port.as_ref(), &series, range)?;

    let smoothed = smooth(&history, method);
    eprintln!("{} of {}: {} points", method, series, smoothed.len());
    let body = serde_json::to_string_pretty(&smoothed).map_err(|e| ForecastError::Report {
        reason: e.to_string(),
    })?;
    println!("{}", body);
    Ok(())
}

fn run_seasonality(source: &SourceArgs, selection: &SeriesArgs) -> Result<(), ForecastError> {
    let config = load_config(source.config.as_deref())?;
    let series = resolve_series(selection.series.as_deref(), &config)?;
    let range = resolve_range(selection, &config)?;
    let data_port = build_data_port(&config, source)?;
    let history = fetch_history(data_port.as_ref(), &series, range)?;

    let report = detect_seasonality(&history);
    eprintln!("\n=== Seasonality: {} ===", series);
    print_seasonality_line(&report);
    for day in &report.day_averages {
        eprintln!(
            "  {}:  {} ({} samples)",
            day.weekday,
            fixed(day.average, 2),
            day.samples
        );
    }
    let body = serde_json::to_string_pretty(&report).map_err(|e| ForecastError::Report {
        reason: e.to_string(),
    })?;
    println!("{}", body);
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), ForecastError> {
    eprintln!("Validating config: {}", config_path.display());
    let config = load_config(Some(config_path))?;
    validate_all(&config)?;

    let request = build_forecast_request(&config, &SeriesArgs::default(), None, None);
    match request {
        Ok(request) => {
            eprintln!("  series: {}", request.series);
            eprintln!("  model:  {}", request.model);
            eprintln!("  days:   {}", request.forecast_days);
        }
        Err(ForecastError::ConfigMissing { .. }) => {
            eprintln!("  series: (set with --series)");
        }
        Err(e) => return Err(e),
    }

    eprintln!("\nConfiguration is valid.");
    Ok(())
}

fn run_list_series(source: &SourceArgs) -> Result<(), ForecastError> {
    let config = load_config(source.config.as_deref())?;
    let data_port = build_data_port(&config, source)?;
    let series = data_port.list_series()?;

    if series.is_empty() {
        eprintln!("No series found");
    } else {
        for name in &series {
            println!("{}", name);
        }
        eprintln!("{} series found", series.len());
    }
    Ok(())
}

fn run_info(source: &SourceArgs, series: Option<&str>) -> Result<(), ForecastError> {
    let config = load_config(source.config.as_deref())?;
    let data_port = build_data_port(&config, source)?;

    let names = match series {
        Some(s) => vec![s.to_string()],
        None => data_port.list_series()?,
    };

    for name in &names {
        match data_port.get_data_range(name) {
            Ok(Some((first, last, count))) => {
                println!("{}: {} points, {} to {}", name, count, first, last);
            }
            Ok(None) => eprintln!("{}: no data found", name),
            Err(e) => eprintln!("error querying {}: {}", name, e),
        }
    }
    Ok(())
}

fn run_serve(source: &SourceArgs, listen: Option<&str>) -> Result<(), ForecastError> {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{build_router, AppState};
        use std::net::SocketAddr;
        use std::sync::Arc;

        let config = load_config(source.config.as_deref())?;
        let data_port: Arc<dyn DataPort + Send + Sync> =
            Arc::from(build_data_port(&config, source)?);

        let listen = listen
            .map(str::to_string)
            .or_else(|| config.get_string("web", "listen"))
            .unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let addr: SocketAddr = listen
            .parse()
            .map_err(|_| ForecastError::config_invalid("web", "listen", format!("invalid address '{}'", listen)))?;

        let router = build_router(AppState {
            data_port,
            config: Arc::new(config),
        });

        tracing::info!(%addr, "starting web server");
        tokio::runtime::Runtime::new()?.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, router).await
        })?;
        Ok(())
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = (source, listen);
        Err(ForecastError::Io(std::io::Error::other(
            "web feature is required for serve",
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn cli_parses_forecast_flags() {
        let cli = Cli::try_parse_from([
            "pricecast",
            "forecast",
            "--series",
            "Hyderabad",
            "--days",
            "14",
            "--model",
            "wma",
            "--simulated",
            "--start",
            "2026-01-01",
        ])
        .unwrap();
        match cli.command {
            Command::Forecast {
                source,
                selection,
                days,
                model,
                ..
            } => {
                assert!(source.simulated);
                assert_eq!(selection.series.as_deref(), Some("Hyderabad"));
                assert_eq!(selection.start, NaiveDate::from_ymd_opt(2026, 1, 1));
                assert_eq!(days, Some(14));
                assert_eq!(model.as_deref(), Some("wma"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn cli_rejects_bad_date_flag() {
        assert!(Cli::try_parse_from(["pricecast", "seasonality", "--start", "01/01/2026"]).is_err());
    }

    #[test]
    fn request_defaults() {
        let config = make_config("[forecast]\nseries = Pune\n");
        let request =
            build_forecast_request(&config, &SeriesArgs::default(), None, None).unwrap();
        assert_eq!(request.series, "Pune");
        assert_eq!(request.forecast_days, 30);
        assert_eq!(request.model, ModelType::Linear);
        assert_eq!(request.range, DateRange::all());
    }

    #[test]
    fn request_reads_config() {
        let config = make_config(
            "[forecast]\nseries = Pune\ndays = 7\nmodel = ets\nstart_date = 2026-01-01\n",
        );
        let request =
            build_forecast_request(&config, &SeriesArgs::default(), None, None).unwrap();
        assert_eq!(request.forecast_days, 7);
        assert_eq!(request.model, ModelType::Ets);
        assert_eq!(request.range.start, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(request.range.end, None);
    }

    #[test]
    fn flags_override_config() {
        let config = make_config("[forecast]\nseries = Pune\ndays = 7\nmodel = ets\n");
        let selection = SeriesArgs {
            series: Some("Delhi".to_string()),
            ..Default::default()
        };
        let request = build_forecast_request(&config, &selection, Some(60), Some("wma")).unwrap();
        assert_eq!(request.series, "Delhi");
        assert_eq!(request.forecast_days, 60);
        assert_eq!(request.model, ModelType::Wma);
    }

    #[test]
    fn unknown_model_falls_back_to_linear() {
        let config = make_config("[forecast]\nseries = Pune\nmodel = prophet\n");
        let request =
            build_forecast_request(&config, &SeriesArgs::default(), None, None).unwrap();
        assert_eq!(request.model, ModelType::Linear);
    }

    #[test]
    fn zero_days_flag_rejected() {
        let config = make_config("[forecast]\nseries = Pune\n");
        let err =
            build_forecast_request(&config, &SeriesArgs::default(), Some(0), None).unwrap_err();
        assert!(matches!(err, ForecastError::ConfigInvalid { key, .. } if key == "days"));
    }

    #[test]
    fn zero_window_flag_rejected() {
        let err = resolve_smoothing_method("sma", Some(0), None).unwrap_err();
        assert!(matches!(err, ForecastError::ConfigInvalid { key, .. } if key == "window"));
        assert!(resolve_smoothing_method("wma", Some(1), None).is_ok());
    }

    #[test]
    fn smoothing_alpha_bounds() {
        let err = resolve_smoothing_method("ets", None, Some(0.0)).unwrap_err();
        assert!(matches!(err, ForecastError::ConfigInvalid { key, .. } if key == "alpha"));
        assert!(resolve_smoothing_method("ets", None, Some(1.5)).is_err());
        assert_eq!(
            resolve_smoothing_method("ets", None, Some(0.004)).unwrap(),
            SmoothingMethod::Ets { alpha: 0.004 }
        );
    }

    #[test]
    fn unknown_smoothing_method_rejected() {
        let err = resolve_smoothing_method("holt", None, None).unwrap_err();
        assert!(matches!(err, ForecastError::ConfigInvalid { key, .. } if key == "method"));
    }

    #[test]
    fn missing_series_is_config_missing() {
        let config = make_config("[forecast]\ndays = 7\n");
        let err =
            build_forecast_request(&config, &SeriesArgs::default(), None, None).unwrap_err();
        assert!(matches!(err, ForecastError::ConfigMissing { key, .. } if key == "series"));
    }

    #[test]
    fn data_port_requires_csv_dir() {
        let config = make_config("[data]\nsource = csv\n");
        let err = build_data_port(&config, &SourceArgs::default()).err().unwrap();
        assert!(matches!(err, ForecastError::ConfigMissing { key, .. } if key == "csv_dir"));
    }

    #[test]
    fn data_dir_flag_satisfies_csv_source() {
        let config = make_config("[data]\n");
        let source = SourceArgs {
            data_dir: Some(PathBuf::from("/tmp")),
            ..Default::default()
        };
        assert!(build_data_port(&config, &source).is_ok());
    }

    #[test]
    fn unknown_source_rejected() {
        let config = make_config("[data]\nsource = scraper\n");
        let err = build_data_port(&config, &SourceArgs::default()).err().unwrap();
        assert!(matches!(err, ForecastError::ConfigInvalid { key, .. } if key == "source"));
    }

    #[test]
    fn simulated_port_lists_configured_series() {
        let config = make_config(
            "[data]\nsource = simulated\nseries = Hyderabad, Pune\nsimulation_start = 2026-01-01\nsimulation_end = 2026-01-31\n",
        );
        let port = build_data_port(&config, &SourceArgs::default()).unwrap();
        assert_eq!(port.list_series().unwrap(), vec!["Hyderabad", "Pune"]);
        assert_eq!(
            port.get_data_range("Hyderabad").unwrap().map(|r| r.2),
            Some(31)
        );
    }

    #[test]
    fn report_port_formats() {
        assert!(report_port_for("json").is_ok());
        assert!(report_port_for("CSV").is_ok());
        assert!(matches!(
            report_port_for("xml").err().unwrap(),
            ForecastError::ConfigInvalid { key, .. } if key == "format"
        ));
    }

    #[test]
    fn resolve_series_trims_and_rejects_blank() {
        let config = make_config("[forecast]\nseries =   \n");
        assert!(resolve_series(None, &config).is_err());
        assert_eq!(resolve_series(Some(" Pune "), &config).unwrap(), "Pune");
    }
}
