//! Cumulative return over a price window.

use crate::domain::error::ScreenerError;
use crate::domain::price::PriceSeries;

pub const MIN_RETURN_BARS: usize = 2;

/// A symbol's compounded growth factor; `None` when it could not be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnProfile {
    pub symbol: String,
    pub multiplier: Option<f64>,
}

impl ReturnProfile {
    pub fn undefined(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            multiplier: None,
        }
    }
}

/// Compounds `1 + pct_change` of the adjusted close over the whole series.
pub fn cumulative_return(series: &PriceSeries) -> Result<f64, ScreenerError> {
    if series.len() < MIN_RETURN_BARS {
        return Err(ScreenerError::InsufficientHistory {
            symbol: series.symbol.clone(),
            bars: series.len(),
            minimum: MIN_RETURN_BARS,
        });
    }

    if let Some(bad) = series
        .bars
        .iter()
        .find(|b| !b.adj_close.is_finite() || b.adj_close <= 0.0)
    {
        return Err(ScreenerError::InvalidPrice {
            symbol: series.symbol.clone(),
            reason: format!("adjusted close {} on {}", bad.adj_close, bad.date),
        });
    }

    let multiplier = series.bars.windows(2).fold(1.0, |acc, pair| {
        let prev = pair[0].adj_close;
        let curr = pair[1].adj_close;
        acc * (1.0 + (curr - prev) / prev)
    });
    Ok(multiplier)
}

pub fn return_profile(series: &PriceSeries) -> Result<ReturnProfile, ScreenerError> {
    Ok(ReturnProfile {
        symbol: series.symbol.clone(),
        multiplier: Some(cumulative_return(series)?),
    })
}
