//! Price history port traits.

use crate::domain::error::ScreenerError;
use crate::domain::price::PriceSeries;
use chrono::NaiveDate;

/// Source of daily bars for a symbol or the benchmark.
pub trait PriceHistoryProvider: Send + Sync {
    /// Bars dated within `[start_date, end_date]`, oldest first.
    fn fetch_series(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PriceSeries, ScreenerError>;
}

/// Optional sink for raw per-symbol series. Nothing reads it back within a run.
pub trait PriceHistoryCache: Send + Sync {
    fn store(&self, series: &PriceSeries) -> Result<(), ScreenerError>;
}
