//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::chart_svg::DEFAULT_CHART_HEIGHT;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_dashboard_adapter::HtmlDashboardAdapter;
use crate::adapters::yahoo_adapter::YahooAdapter;
use crate::domain::config_validation::{validate_dashboard_config, MIN_CHART_HEIGHT};
use crate::domain::dashboard::{Dashboard, DashboardView};
use crate::domain::display::DisplayRange;
use crate::domain::error::DashboardError;
use crate::domain::indicator::IndicatorEngine;
use crate::domain::resolver::TickerResolver;
use crate::domain::trend::TrendReading;
use crate::domain::window_config::WindowConfig;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceFetcher;
use crate::ports::report_port::DashboardPort;

#[derive(Parser, Debug)]
#[command(name = "trendscope", about = "Moving-average trend dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one symbol and print its trend summary
    Show {
        /// Stock code, e.g. 2330
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Display range in trading days: 60, 120, 240 (or 3m, 6m, 1y)
        #[arg(long)]
        range: Option<DisplayRange>,
        /// Chart height in pixels for the HTML dashboard
        #[arg(long)]
        height: Option<u32>,
        /// Write an HTML dashboard to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Print the dashboard record as JSON
        #[arg(long)]
        json: bool,
        /// Read prices from CSV files in this directory instead of Yahoo
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a configuration file and print the effective settings
    CheckConfig {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Show {
            symbol,
            config,
            range,
            height,
            output,
            json,
            data_dir,
        } => run_show(
            &symbol,
            config.as_ref(),
            ShowOptions {
                range,
                height,
                output,
                json,
            },
            data_dir.as_deref(),
        ),
        Command::CheckConfig { config } => run_check_config(&config),
        Command::Serve { config } => run_serve(&config),
    }
}

/// Presentation choices for `show`, already separated from data selection.
#[derive(Debug, Clone, Default)]
pub struct ShowOptions {
    pub range: Option<DisplayRange>,
    pub height: Option<u32>,
    pub output: Option<PathBuf>,
    pub json: bool,
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = DashboardError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            load_config(p)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn build_dashboard(config: &dyn ConfigPort) -> Result<Dashboard, DashboardError> {
    let windows = WindowConfig::from_config(config)?;
    let resolver = TickerResolver::from_config(config)?;
    Ok(Dashboard::new(resolver, IndicatorEngine::new(windows)))
}

/// `data_dir` forces the CSV source regardless of `[data] source`.
pub fn build_fetcher(
    config: &dyn ConfigPort,
    data_dir: Option<&Path>,
) -> Result<Box<dyn PriceFetcher + Send + Sync>, DashboardError> {
    if let Some(dir) = data_dir {
        return Ok(Box::new(CsvAdapter::new(dir.to_path_buf())));
    }

    let source = config
        .get_string("data", "source")
        .unwrap_or_else(|| "yahoo".to_string())
        .to_lowercase();
    match source.as_str() {
        "yahoo" => Ok(Box::new(YahooAdapter::from_config(config)?)),
        "csv" => {
            let dir = config
                .get_string("data", "csv_dir")
                .ok_or_else(|| DashboardError::ConfigMissing {
                    section: "data".into(),
                    key: "csv_dir".into(),
                })?;
            Ok(Box::new(CsvAdapter::new(PathBuf::from(dir))))
        }
        other => Err(DashboardError::ConfigInvalid {
            section: "data".into(),
            key: "source".into(),
            reason: format!("unknown source {other:?}"),
        }),
    }
}

pub fn display_range(
    config: &dyn ConfigPort,
    range_override: Option<DisplayRange>,
) -> Result<DisplayRange, DashboardError> {
    if let Some(range) = range_override {
        return Ok(range);
    }
    match config.get_string("display", "range") {
        Some(raw) => raw.parse(),
        None => Ok(DisplayRange::default()),
    }
}

/// `--height` wins over `[display] height`; both must reach the minimum.
pub fn chart_height(
    config: &dyn ConfigPort,
    height_override: Option<u32>,
) -> Result<u32, DashboardError> {
    let height = match height_override {
        Some(h) => i64::from(h),
        None => config.get_int("display", "height", i64::from(DEFAULT_CHART_HEIGHT)),
    };
    if height < MIN_CHART_HEIGHT {
        return Err(DashboardError::ConfigInvalid {
            section: "display".into(),
            key: "height".into(),
            reason: format!("height {height} is below the minimum of {MIN_CHART_HEIGHT}"),
        });
    }
    u32::try_from(height).map_err(|_| DashboardError::ConfigInvalid {
        section: "display".into(),
        key: "height".into(),
        reason: format!("height {height} is too large"),
    })
}

pub fn format_summary(view: &DashboardView) -> String {
    let indicator = view
        .last_indicator_value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "n/a".to_string());
    let trend = match view.trend {
        TrendReading::Undetermined {
            required,
            available,
        } => format!("Undetermined (have {available} sessions, need {required})"),
        reading => reading.to_string(),
    };
    let label = format!("{}:", view.indicator_label());
    format!(
        "{:<12} {}\n{:<12} {:.2}\n{:<12} {}\n{:<12} {}\n{:<12} last {} of {} sessions\n",
        "Ticker:",
        view.resolved_ticker,
        "Last price:",
        view.last_price,
        label,
        indicator,
        "Trend:",
        trend,
        "Showing:",
        view.display_prices.len(),
        view.history_len
    )
}

fn run_show(
    symbol: &str,
    config_path: Option<&PathBuf>,
    options: ShowOptions,
    data_dir: Option<&Path>,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_dashboard_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let dashboard = match build_dashboard(&config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let fetcher = match build_fetcher(&config, data_dir) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let range = match display_range(&config, options.range) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let height = match chart_height(&config, options.height) {
        Ok(h) => h,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let options = ShowOptions {
        range: Some(range),
        height: Some(height),
        ..options
    };

    run_show_pipeline(fetcher.as_ref(), &dashboard, symbol, &options)
}

/// Analyze, then print and optionally render. Errors are reported on stderr
/// and mapped to an exit code.
pub fn run_show_pipeline(
    fetcher: &dyn PriceFetcher,
    dashboard: &Dashboard,
    symbol: &str,
    options: &ShowOptions,
) -> ExitCode {
    let range = options.range.unwrap_or_default();
    eprintln!("Analyzing {}...", symbol.trim());

    let view = match dashboard.analyze(fetcher, symbol, range) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if options.json {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                let err = DashboardError::Io(std::io::Error::other(e));
                eprintln!("error: {err}");
                return (&err).into();
            }
        }
    } else {
        print!("{}", format_summary(&view));
    }

    if let Some(output) = &options.output {
        let adapter = HtmlDashboardAdapter::new(options.height.unwrap_or(DEFAULT_CHART_HEIGHT));
        let path = output.display().to_string();
        if let Err(e) = adapter.render(&view, &path) {
            eprintln!("error: {e}");
            return (&e).into();
        }
        eprintln!("Dashboard written to {path}");
    }

    ExitCode::SUCCESS
}

fn run_check_config(config_path: &PathBuf) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_dashboard_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    let dashboard = match build_dashboard(&config) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprint!("{}", describe_settings(&dashboard));
    eprintln!("\nConfiguration is valid");
    ExitCode::SUCCESS
}

pub fn describe_settings(dashboard: &Dashboard) -> String {
    let resolver = dashboard.resolver();
    let windows = dashboard.engine().windows();

    let suffixes: Vec<String> = resolver
        .suffixes()
        .iter()
        .map(|s| {
            if s.is_empty() {
                "(bare)".to_string()
            } else {
                s.clone()
            }
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format!("Suffix candidates: {}\n", suffixes.join(", ")));
    out.push_str(&format!("Lookback: {}\n", resolver.lookback()));
    out.push_str(&format!("Default window: {}\n", windows.default_window()));
    out.push_str("Window overrides:\n");
    for (symbol, window) in windows.overrides() {
        out.push_str(&format!("  {symbol} = {window}\n"));
    }
    out
}

#[cfg(feature = "web")]
pub fn build_app_state(
    config: &dyn ConfigPort,
) -> Result<crate::adapters::web::AppState, DashboardError> {
    use std::sync::Arc;

    let fetcher: Arc<dyn PriceFetcher + Send + Sync> = Arc::from(build_fetcher(config, None)?);
    Ok(crate::adapters::web::AppState {
        fetcher,
        dashboard: Arc::new(build_dashboard(config)?),
        default_range: display_range(config, None)?,
        chart_height: chart_height(config, None)?,
    })
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::build_router;
        use std::net::SocketAddr;

        eprintln!("Loading config from {}", config_path.display());
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };
        if let Err(e) = validate_dashboard_config(&config) {
            eprintln!("error: {e}");
            return (&e).into();
        }

        let state = match build_app_state(&config) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let listen = config
            .get_string("web", "listen")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string());
        let addr: SocketAddr = match listen.parse() {
            Ok(a) => a,
            Err(_) => {
                let err = DashboardError::ConfigInvalid {
                    section: "web".into(),
                    key: "listen".into(),
                    reason: format!("invalid socket address {listen:?}"),
                };
                eprintln!("error: {err}");
                return (&err).into();
            }
        };

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(1);
            }
        };

        eprintln!("Starting web server on {}", addr);
        let router = build_router(state);
        let served = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            axum::serve(listener, router).await
        });
        if let Err(e) = served {
            let err = DashboardError::Io(e);
            eprintln!("error: {err}");
            return (&err).into();
        }

        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
