#![allow(dead_code)]

use chrono::NaiveDate;
use relscreen::domain::aggregate::ScreenResult;
use relscreen::domain::error::ScreenerError;
pub use relscreen::domain::price::{PriceBar, PriceSeries};
use relscreen::ports::data_port::{PriceHistoryCache, PriceHistoryProvider};
use relscreen::ports::fundamentals_port::{FundamentalInfo, FundamentalsProvider};
use relscreen::ports::report_port::ReportPort;
use std::collections::HashMap;
use std::sync::Mutex;

pub struct MockPriceProvider {
    pub data: HashMap<String, Vec<PriceBar>>,
    pub errors: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl MockPriceProvider {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn called(&self, symbol: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|s| s == symbol)
    }
}

impl PriceHistoryProvider for MockPriceProvider {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, ScreenerError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        if let Some(reason) = self.errors.get(symbol) {
            return Err(ScreenerError::Network {
                reason: reason.clone(),
            });
        }
        let bars = self
            .data
            .get(symbol)
            .ok_or_else(|| ScreenerError::NotFound {
                symbol: symbol.to_string(),
            })?
            .iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .cloned()
            .collect();
        Ok(PriceSeries::new(symbol, bars))
    }
}

pub struct MockFundamentals {
    pub info: HashMap<String, FundamentalInfo>,
    pub calls: Mutex<Vec<String>>,
}

impl MockFundamentals {
    pub fn new() -> Self {
        Self {
            info: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_recommendation(mut self, symbol: &str, key: &str) -> Self {
        self.info.insert(
            symbol.to_string(),
            FundamentalInfo {
                recommendation_key: Some(key.to_string()),
                peg_ratio: Some(1.5),
            },
        );
        self
    }

    pub fn with_info(mut self, symbol: &str, info: FundamentalInfo) -> Self {
        self.info.insert(symbol.to_string(), info);
        self
    }

    pub fn called(&self, symbol: &str) -> bool {
        self.calls.lock().unwrap().iter().any(|s| s == symbol)
    }
}

impl FundamentalsProvider for MockFundamentals {
    fn fetch_info(&self, symbol: &str) -> Result<FundamentalInfo, ScreenerError> {
        self.calls.lock().unwrap().push(symbol.to_string());
        self.info
            .get(symbol)
            .cloned()
            .ok_or_else(|| ScreenerError::DataUnavailable {
                symbol: symbol.to_string(),
                field: "fundamentals".to_string(),
            })
    }
}

#[derive(Default)]
pub struct MockCache {
    pub stored: Mutex<Vec<String>>,
}

impl PriceHistoryCache for MockCache {
    fn store(&self, series: &PriceSeries) -> Result<(), ScreenerError> {
        self.stored.lock().unwrap().push(series.symbol.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockReport {
    pub written: Mutex<Vec<Vec<ScreenResult>>>,
}

impl ReportPort for MockReport {
    fn write(&self, results: &[ScreenResult]) -> Result<(), ScreenerError> {
        self.written.lock().unwrap().push(results.to_vec());
        Ok(())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn as_of() -> NaiveDate {
    date(2024, 12, 31)
}

pub fn make_bar(date: NaiveDate, adj_close: f64) -> PriceBar {
    PriceBar {
        date,
        open: adj_close,
        high: adj_close * 1.01,
        low: adj_close * 0.99,
        close: adj_close,
        adj_close,
        volume: 1000,
    }
}

/// One bar per price, on consecutive days ending at `as_of()`.
pub fn bars_from_prices(prices: &[f64]) -> Vec<PriceBar> {
    let n = prices.len() as i64;
    prices
        .iter()
        .enumerate()
        .map(|(i, &p)| make_bar(as_of() - chrono::Duration::days(n - 1 - i as i64), p))
        .collect()
}

/// `count` bars compounding at `daily_growth`, starting at 100.
pub fn geometric_bars(count: usize, daily_growth: f64) -> Vec<PriceBar> {
    let prices: Vec<f64> = (0..count)
        .map(|i| 100.0 * daily_growth.powi(i as i32))
        .collect();
    bars_from_prices(&prices)
}
