//! Trend and 52-week range statistics for one symbol.

use crate::domain::error::ScreenerError;
use crate::domain::indicator::ema::calculate_ema;
use crate::domain::indicator::range::{range_high, range_low, DEFAULT_RANGE_SESSIONS};
use crate::domain::price::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TechnicalParams {
    pub ema_short: usize,
    pub ema_long: usize,
    pub range_sessions: usize,
}

impl Default for TechnicalParams {
    fn default() -> Self {
        Self {
            ema_short: 50,
            ema_long: 150,
            range_sessions: DEFAULT_RANGE_SESSIONS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TechnicalSnapshot {
    pub symbol: String,
    pub latest_price: f64,
    pub ema_short: f64,
    pub ema_long: f64,
    pub low_52w: f64,
    pub high_52w: f64,
}

/// Computes the snapshot from the symbol's own series.
///
/// Short series are evaluated over whatever history exists; only an empty
/// series is rejected.
pub fn evaluate_technicals(
    series: &PriceSeries,
    params: &TechnicalParams,
) -> Result<TechnicalSnapshot, ScreenerError> {
    let insufficient = || ScreenerError::InsufficientHistory {
        symbol: series.symbol.clone(),
        bars: series.len(),
        minimum: 1,
    };

    let latest = series.latest().ok_or_else(insufficient)?;
    let ema_short = calculate_ema(&series.bars, params.ema_short)
        .last_value()
        .ok_or_else(insufficient)?;
    let ema_long = calculate_ema(&series.bars, params.ema_long)
        .last_value()
        .ok_or_else(insufficient)?;
    let low_52w = range_low(&series.bars, params.range_sessions).ok_or_else(insufficient)?;
    let high_52w = range_high(&series.bars, params.range_sessions).ok_or_else(insufficient)?;

    Ok(TechnicalSnapshot {
        symbol: series.symbol.clone(),
        latest_price: latest.adj_close,
        ema_short,
        ema_long,
        low_52w,
        high_52w,
    })
}
