//! Screening pipeline.
//!
//! Universe → price fetch → return multiplier → relative-strength rank →
//! percentile selection → technical + fundamental evaluation → admission
//! gate → ranked results.
//!
//! Per-symbol work runs on a bounded rayon pool. Ranking waits for every
//! symbol's return profile; a symbol that fails at any stage is recorded in
//! [`ScreenReport::failures`] and drops out without affecting its peers. Only
//! universe and benchmark failures abort the run.

use std::collections::HashMap;
use std::fmt;

use chrono::{Duration, NaiveDate};
use rayon::prelude::*;
use rayon::ThreadPool;
use tracing::{debug, info, warn};

use crate::domain::aggregate::{aggregate_results, AdmittedSymbol, ScreenResult};
use crate::domain::error::ScreenerError;
use crate::domain::fundamental::evaluate_fundamentals;
use crate::domain::gate::{evaluate_gate, GateThresholds};
use crate::domain::price::PriceSeries;
use crate::domain::ranking::{rank_relative_strength, PerformanceRecord};
use crate::domain::returns::{cumulative_return, return_profile, ReturnProfile};
use crate::domain::selection::{select_performers, QuantileMethod};
use crate::domain::technical::{evaluate_technicals, TechnicalParams};
use crate::domain::universe::normalize_universe;
use crate::ports::data_port::{PriceHistoryCache, PriceHistoryProvider};
use crate::ports::fundamentals_port::FundamentalsProvider;
use crate::ports::universe_port::UniverseProvider;

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenConfig {
    pub benchmark: String,
    pub window_days: i64,
    pub percentile_threshold: f64,
    pub quantile_method: QuantileMethod,
    pub technical: TechnicalParams,
    pub thresholds: GateThresholds,
    pub workers: usize,
}

impl ScreenConfig {
    pub fn new(benchmark: impl Into<String>) -> Self {
        Self {
            benchmark: benchmark.into(),
            window_days: 365,
            percentile_threshold: 0.60,
            quantile_method: QuantileMethod::default(),
            technical: TechnicalParams::default(),
            thresholds: GateThresholds::default(),
            workers: 4,
        }
    }

    /// Inclusive `[start, end]` date window ending at `as_of`.
    pub fn window(&self, as_of: NaiveDate) -> Result<(NaiveDate, NaiveDate), ScreenerError> {
        let start = Duration::try_days(self.window_days)
            .and_then(|days| as_of.checked_sub_signed(days))
            .ok_or_else(|| ScreenerError::ConfigInvalid {
                section: "screen".to_string(),
                key: "window_days".to_string(),
                reason: format!(
                    "{} days before {} is out of the supported date range",
                    self.window_days, as_of
                ),
            })?;
        Ok((start, as_of))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    PriceFetch,
    Returns,
    Technical,
    Fundamental,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::PriceFetch => write!(f, "price fetch"),
            Stage::Returns => write!(f, "returns"),
            Stage::Technical => write!(f, "technical"),
            Stage::Fundamental => write!(f, "fundamental"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolFailure {
    pub symbol: String,
    pub stage: Stage,
    pub reason: String,
}

impl SymbolFailure {
    fn new(symbol: &str, stage: Stage, err: &ScreenerError) -> Self {
        warn!(symbol, %stage, error = %err, "skipping symbol");
        Self {
            symbol: symbol.to_string(),
            stage,
            reason: err.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScreenReport {
    pub benchmark_multiplier: f64,
    /// One record per universe symbol, in universe order.
    pub performance: Vec<PerformanceRecord>,
    /// Symbols that cleared the percentile threshold.
    pub selected: Vec<String>,
    pub results: Vec<ScreenResult>,
    pub failures: Vec<SymbolFailure>,
}

impl ScreenReport {
    pub fn failed(&self, symbol: &str) -> Option<&SymbolFailure> {
        self.failures.iter().find(|f| f.symbol == symbol)
    }
}

pub struct Screener<'a> {
    prices: &'a dyn PriceHistoryProvider,
    fundamentals: &'a dyn FundamentalsProvider,
    cache: Option<&'a dyn PriceHistoryCache>,
    config: &'a ScreenConfig,
}

struct LoadedSymbol {
    profile: ReturnProfile,
    series: Option<PriceSeries>,
    failure: Option<SymbolFailure>,
}

impl<'a> Screener<'a> {
    pub fn new(
        prices: &'a dyn PriceHistoryProvider,
        fundamentals: &'a dyn FundamentalsProvider,
        config: &'a ScreenConfig,
    ) -> Self {
        Self {
            prices,
            fundamentals,
            cache: None,
            config,
        }
    }

    pub fn with_cache(mut self, cache: &'a dyn PriceHistoryCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Fetches the universe from `universe` and screens it.
    pub fn screen_universe(
        &self,
        universe: &dyn UniverseProvider,
        as_of: NaiveDate,
    ) -> Result<ScreenReport, ScreenerError> {
        let symbols = normalize_universe(universe.fetch_universe()?)?;
        info!(symbols = symbols.len(), "universe loaded");
        self.run(&symbols, as_of)
    }

    pub fn run(&self, universe: &[String], as_of: NaiveDate) -> Result<ScreenReport, ScreenerError> {
        let pool = self.build_pool()?;
        let (start, end) = self.config.window(as_of)?;

        let benchmark = self.prices.fetch_series(&self.config.benchmark, start, end)?;
        let benchmark_multiplier = cumulative_return(&benchmark)?;
        info!(
            benchmark = %self.config.benchmark,
            multiplier = benchmark_multiplier,
            %start,
            %end,
            "benchmark return computed"
        );

        // Stage 1: fetch and compute returns for every symbol
        let loaded: Vec<LoadedSymbol> = pool.install(|| {
            universe
                .par_iter()
                .map(|symbol| self.load_symbol(symbol, start, end))
                .collect()
        });

        let mut failures = Vec::new();
        let mut profiles = Vec::with_capacity(loaded.len());
        let mut series_by_symbol = HashMap::new();
        for item in loaded {
            if let Some(series) = item.series {
                series_by_symbol.insert(series.symbol.clone(), series);
            }
            failures.extend(item.failure);
            profiles.push(item.profile);
        }

        // Stage 2: rank the whole universe at once
        let performance = rank_relative_strength(benchmark_multiplier, &profiles);
        let selected = select_performers(
            &performance,
            self.config.percentile_threshold,
            self.config.quantile_method,
        );
        info!(
            ranked = performance.iter().filter(|r| r.percentile_score.is_some()).count(),
            selected = selected.len(),
            threshold = self.config.percentile_threshold,
            "relative strength ranking complete"
        );

        // Stage 3: technical + fundamental gate for survivors
        let evaluated: Vec<Result<Option<AdmittedSymbol>, SymbolFailure>> = pool.install(|| {
            selected
                .par_iter()
                .map(|record| self.evaluate_candidate(record, &series_by_symbol))
                .collect()
        });

        let mut admitted = Vec::new();
        for outcome in evaluated {
            match outcome {
                Ok(Some(symbol)) => admitted.push(symbol),
                Ok(None) => {}
                Err(failure) => failures.push(failure),
            }
        }

        let results = aggregate_results(&admitted);
        info!(
            admitted = results.len(),
            failed = failures.len(),
            "screen complete"
        );

        Ok(ScreenReport {
            benchmark_multiplier,
            performance,
            selected: selected.into_iter().map(|r| r.symbol).collect(),
            results,
            failures,
        })
    }

    fn build_pool(&self) -> Result<ThreadPool, ScreenerError> {
        rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers.max(1))
            .build()
            .map_err(|e| ScreenerError::WorkerPool {
                reason: e.to_string(),
            })
    }

    fn load_symbol(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> LoadedSymbol {
        let series = match self.prices.fetch_series(symbol, start, end) {
            Ok(series) => series,
            Err(e) => {
                return LoadedSymbol {
                    profile: ReturnProfile::undefined(symbol),
                    series: None,
                    failure: Some(SymbolFailure::new(symbol, Stage::PriceFetch, &e)),
                };
            }
        };

        if let Some(cache) = self.cache {
            if let Err(e) = cache.store(&series) {
                warn!(symbol, error = %e, "failed to cache price history");
            }
        }

        match return_profile(&series) {
            Ok(profile) => {
                debug!(symbol, bars = series.len(), multiplier = ?profile.multiplier, "return computed");
                LoadedSymbol {
                    profile,
                    series: Some(series),
                    failure: None,
                }
            }
            Err(e) => LoadedSymbol {
                profile: ReturnProfile::undefined(symbol),
                series: None,
                failure: Some(SymbolFailure::new(symbol, Stage::Returns, &e)),
            },
        }
    }

    fn evaluate_candidate(
        &self,
        record: &PerformanceRecord,
        series_by_symbol: &HashMap<String, PriceSeries>,
    ) -> Result<Option<AdmittedSymbol>, SymbolFailure> {
        let symbol = record.symbol.as_str();
        let series = series_by_symbol.get(symbol).ok_or_else(|| {
            SymbolFailure::new(
                symbol,
                Stage::Technical,
                &ScreenerError::NotFound {
                    symbol: symbol.to_string(),
                },
            )
        })?;

        let technical = evaluate_technicals(series, &self.config.technical)
            .map_err(|e| SymbolFailure::new(symbol, Stage::Technical, &e))?;
        let fundamental = evaluate_fundamentals(self.fundamentals, symbol)
            .map_err(|e| SymbolFailure::new(symbol, Stage::Fundamental, &e))?;

        let outcome = evaluate_gate(&technical, &fundamental, &self.config.thresholds);
        debug!(
            symbol,
            trend_aligned = outcome.trend_aligned,
            above_floor = outcome.above_floor,
            near_ceiling = outcome.near_ceiling,
            sentiment_ok = outcome.sentiment_ok,
            "admission gate evaluated"
        );

        if !outcome.admitted() {
            return Ok(None);
        }
        Ok(Some(AdmittedSymbol {
            performance: record.clone(),
            technical,
            fundamental,
        }))
    }
}
