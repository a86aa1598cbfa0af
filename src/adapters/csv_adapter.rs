//! CSV file price adapter.
//!
//! One file per symbol, `<base>/<SYMBOL>.csv`, with the columns
//! `Date,Open,High,Low,Close,Adj Close,Volume`. Serves as both the price
//! history source and the cache sink.

use crate::domain::error::ScreenerError;
use crate::domain::price::{PriceBar, PriceSeries};
use crate::ports::data_port::{PriceHistoryCache, PriceHistoryProvider};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
struct CsvPriceRow {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Open")]
    open: Option<f64>,
    #[serde(rename = "High")]
    high: Option<f64>,
    #[serde(rename = "Low")]
    low: Option<f64>,
    #[serde(rename = "Close")]
    close: Option<f64>,
    #[serde(rename = "Adj Close", default)]
    adj_close: Option<f64>,
    #[serde(rename = "Volume", default)]
    volume: Option<f64>,
}

impl CsvPriceRow {
    /// `None` for rows without prices (non-trading days in some exports).
    fn into_bar(self) -> Result<Option<PriceBar>, ScreenerError> {
        let date = parse_date(&self.date)?;
        let (Some(high), Some(low), Some(close)) = (self.high, self.low, self.close) else {
            return Ok(None);
        };
        Ok(Some(PriceBar {
            date,
            open: self.open.unwrap_or(close),
            high,
            low,
            close,
            adj_close: self.adj_close.unwrap_or(close),
            volume: self.volume.unwrap_or(0.0) as i64,
        }))
    }
}

impl From<&PriceBar> for CsvPriceRow {
    fn from(bar: &PriceBar) -> Self {
        Self {
            date: bar.date.format("%Y-%m-%d").to_string(),
            open: Some(bar.open),
            high: Some(bar.high),
            low: Some(bar.low),
            close: Some(bar.close),
            adj_close: Some(bar.adj_close),
            volume: Some(bar.volume as f64),
        }
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn parse_date(value: &str) -> Result<NaiveDate, ScreenerError> {
    let day = value.trim().get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| ScreenerError::Csv {
        reason: format!("invalid date '{}': {}", value, e),
    })
}

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

impl PriceHistoryProvider for CsvAdapter {
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, ScreenerError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ScreenerError::NotFound {
                symbol: symbol.to_string(),
            },
            _ => ScreenerError::Io(e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.deserialize::<CsvPriceRow>() {
            let Some(bar) = result?.into_bar()? else {
                continue;
            };
            if bar.date < start_date || bar.date > end_date {
                continue;
            }
            bars.push(bar);
        }

        if bars.is_empty() {
            return Err(ScreenerError::NotFound {
                symbol: symbol.to_string(),
            });
        }
        Ok(PriceSeries::new(symbol, bars))
    }
}

impl PriceHistoryCache for CsvAdapter {
    fn store(&self, series: &PriceSeries) -> Result<(), ScreenerError> {
        fs::create_dir_all(&self.base_path)?;
        let mut wtr = csv::Writer::from_path(self.csv_path(&series.symbol))?;
        for bar in &series.bars {
            wtr.serialize(CsvPriceRow::from(bar))?;
        }
        wtr.flush()?;
        Ok(())
    }
}
