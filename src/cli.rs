//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::fundamentals_adapter::CsvFundamentalsAdapter;
use crate::adapters::table_report::TableReportAdapter;
use crate::adapters::universe_adapter::{CsvUniverseAdapter, StaticUniverse};
use crate::domain::config_validation::{
    parse_ema_spans, parse_quantile_method, validate_data_config, validate_screen_config,
};
use crate::domain::error::ScreenerError;
use crate::domain::gate::GateThresholds;
use crate::domain::pipeline::{ScreenConfig, ScreenReport, Screener};
use crate::domain::technical::TechnicalParams;
use crate::domain::universe::normalize_universe;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::{PriceHistoryCache, PriceHistoryProvider};
use crate::ports::fundamentals_port::FundamentalsProvider;
use crate::ports::report_port::ReportPort;
use crate::ports::universe_port::UniverseProvider;

#[derive(Parser, Debug)]
#[command(name = "relscreen", about = "Relative-strength equity screener")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the screen and print the admitted symbols
    Screen {
        #[arg(short, long)]
        config: PathBuf,
        /// Also export the result table as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Last day of the trailing window (defaults to today)
        #[arg(long)]
        as_of: Option<NaiveDate>,
        #[arg(long)]
        benchmark: Option<String>,
    },
    /// Validate a screen configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Print the resolved universe
    Universe {
        #[arg(short, long)]
        config: PathBuf,
    },
}

/// Paths to the file-backed data sources.
#[derive(Debug, Clone, PartialEq)]
pub struct DataConfig {
    pub price_dir: PathBuf,
    pub cache_dir: Option<PathBuf>,
    pub universe_file: Option<PathBuf>,
    pub fundamentals_file: PathBuf,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Screen {
            config,
            output,
            as_of,
            benchmark,
        } => run_screen(&config, output.as_ref(), as_of, benchmark.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::Universe { config } => run_universe(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = ScreenerError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        error!("{err}");
        ExitCode::from(&err)
    })
}

pub fn build_screen_config(adapter: &dyn ConfigPort) -> Result<ScreenConfig, ScreenerError> {
    validate_screen_config(adapter)?;

    let benchmark = adapter
        .get_nonempty("screen", "benchmark")
        .ok_or_else(|| ScreenerError::ConfigMissing {
            section: "screen".into(),
            key: "benchmark".into(),
        })?;
    let (ema_short, ema_long) = parse_ema_spans(adapter)?;

    Ok(ScreenConfig {
        benchmark,
        window_days: adapter.get_int("screen", "window_days", 365),
        percentile_threshold: adapter.get_double("screen", "percentile_threshold", 0.60),
        quantile_method: parse_quantile_method(adapter)?,
        technical: TechnicalParams {
            ema_short,
            ema_long,
            range_sessions: adapter.get_int("screen", "range_sessions", 260) as usize,
        },
        thresholds: GateThresholds {
            floor_multiplier: adapter.get_double("screen", "floor_multiplier", 1.3),
            ceiling_multiplier: adapter.get_double("screen", "ceiling_multiplier", 0.75),
        },
        workers: adapter.get_int("screen", "workers", 4) as usize,
    })
}

pub fn build_data_config(adapter: &dyn ConfigPort) -> Result<DataConfig, ScreenerError> {
    validate_data_config(adapter)?;
    let path = |key: &str| adapter.get_nonempty("data", key).map(PathBuf::from);

    Ok(DataConfig {
        price_dir: path("price_dir").ok_or_else(|| ScreenerError::ConfigMissing {
            section: "data".into(),
            key: "price_dir".into(),
        })?,
        cache_dir: path("cache_dir"),
        universe_file: path("universe_file"),
        fundamentals_file: path("fundamentals_file").ok_or_else(|| {
            ScreenerError::ConfigMissing {
                section: "data".into(),
                key: "fundamentals_file".into(),
            }
        })?,
    })
}

/// `[screen] codes` wins over `[data] universe_file`.
pub fn resolve_universe(
    adapter: &dyn ConfigPort,
    data: &DataConfig,
) -> Result<Box<dyn UniverseProvider>, ScreenerError> {
    if let Some(codes) = adapter.get_nonempty("screen", "codes") {
        return Ok(Box::new(StaticUniverse::parse(&codes)?));
    }
    match &data.universe_file {
        Some(path) => Ok(Box::new(CsvUniverseAdapter::new(path.clone()))),
        None => Err(ScreenerError::ConfigMissing {
            section: "data".into(),
            key: "universe_file".into(),
        }),
    }
}

fn run_screen(
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    as_of: Option<NaiveDate>,
    benchmark_override: Option<&str>,
) -> ExitCode {
    // Stage 1: Load and validate config
    info!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let prepared = build_screen_config(&adapter).and_then(|screen| {
        let data = build_data_config(&adapter)?;
        let universe = resolve_universe(&adapter, &data)?;
        let fundamentals = CsvFundamentalsAdapter::from_file(&data.fundamentals_file)?;
        Ok((screen, data, universe, fundamentals))
    });
    let (mut screen_config, data, universe, fundamentals) = match prepared {
        Ok(p) => p,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    if let Some(b) = benchmark_override {
        screen_config.benchmark = b.to_string();
    }
    info!(
        "Screening against {} ({} fundamentals records)",
        screen_config.benchmark,
        fundamentals.len()
    );

    // Stage 2: Wire adapters
    let prices = CsvAdapter::new(data.price_dir.clone());
    let cache = data.cache_dir.clone().map(CsvAdapter::new);
    let as_of = as_of.unwrap_or_else(|| chrono::Local::now().date_naive());

    let table = TableReportAdapter;
    let csv_report = output_path.map(|p| CsvReportAdapter::new(p.clone()));
    let mut reports: Vec<&dyn ReportPort> = vec![&table];
    if let Some(r) = &csv_report {
        reports.push(r);
    }

    // Stage 3: Screen and report
    match run_screen_pipeline(
        &prices,
        &fundamentals,
        universe.as_ref(),
        cache.as_ref().map(|c| c as &dyn PriceHistoryCache),
        &screen_config,
        as_of,
        &reports,
    ) {
        Ok(report) => {
            if let Some(path) = output_path {
                info!("Results written to: {}", path.display());
            }
            info!(
                "{} of {} symbols admitted ({} skipped)",
                report.results.len(),
                report.performance.len(),
                report.failures.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

/// Runs the screen against the given ports and writes every report.
///
/// Universe and benchmark failures are returned as errors; per-symbol
/// failures only appear in the returned report.
pub fn run_screen_pipeline(
    prices: &dyn PriceHistoryProvider,
    fundamentals: &dyn FundamentalsProvider,
    universe: &dyn UniverseProvider,
    cache: Option<&dyn PriceHistoryCache>,
    config: &ScreenConfig,
    as_of: NaiveDate,
    reports: &[&dyn ReportPort],
) -> Result<ScreenReport, ScreenerError> {
    let mut screener = Screener::new(prices, fundamentals, config);
    if let Some(cache) = cache {
        screener = screener.with_cache(cache);
    }

    let report = screener.screen_universe(universe, as_of)?;
    for port in reports {
        port.write(&report.results)?;
    }
    Ok(report)
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    info!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let resolved = build_screen_config(&adapter)
        .and_then(|screen| Ok((screen, build_data_config(&adapter)?)));
    let (screen, data) = match resolved {
        Ok(r) => r,
        Err(e) => {
            error!("{e}");
            return (&e).into();
        }
    };

    println!("benchmark:            {}", screen.benchmark);
    println!("window_days:          {}", screen.window_days);
    println!(
        "percentile_threshold: {} ({})",
        screen.percentile_threshold, screen.quantile_method
    );
    println!(
        "ema_spans:            {},{}",
        screen.technical.ema_short, screen.technical.ema_long
    );
    println!("range_sessions:       {}", screen.technical.range_sessions);
    println!("floor_multiplier:     {}", screen.thresholds.floor_multiplier);
    println!("ceiling_multiplier:   {}", screen.thresholds.ceiling_multiplier);
    println!("workers:              {}", screen.workers);
    println!("price_dir:            {}", data.price_dir.display());
    if let Some(cache) = &data.cache_dir {
        println!("cache_dir:            {}", cache.display());
    }
    println!("fundamentals_file:    {}", data.fundamentals_file.display());

    info!("Configuration is valid");
    ExitCode::SUCCESS
}

fn run_universe(config_path: &PathBuf) -> ExitCode {
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let symbols = build_data_config(&adapter)
        .and_then(|data| resolve_universe(&adapter, &data))
        .and_then(|universe| Ok(normalize_universe(universe.fetch_universe()?)?));

    match symbols {
        Ok(symbols) => {
            for symbol in &symbols {
                println!("{}", symbol);
            }
            info!("{} symbols in universe", symbols.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}
