//! Analyst sentiment and valuation lookup.

use crate::domain::error::ScreenerError;
use crate::ports::fundamentals_port::{FundamentalInfo, FundamentalsProvider};
use std::fmt;
use std::str::FromStr;

/// Consensus analyst recommendation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Underperform,
    Sell,
    NoRating,
    Other(String),
}

impl Recommendation {
    pub fn from_key(key: &str) -> Self {
        let key = key.trim().to_lowercase();
        match key.as_str() {
            "strong_buy" => Recommendation::StrongBuy,
            "buy" => Recommendation::Buy,
            "hold" => Recommendation::Hold,
            "underperform" => Recommendation::Underperform,
            "sell" => Recommendation::Sell,
            "none" => Recommendation::NoRating,
            _ => Recommendation::Other(key),
        }
    }
}

impl FromStr for Recommendation {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Recommendation::from_key(s))
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::StrongBuy => write!(f, "strong_buy"),
            Recommendation::Buy => write!(f, "buy"),
            Recommendation::Hold => write!(f, "hold"),
            Recommendation::Underperform => write!(f, "underperform"),
            Recommendation::Sell => write!(f, "sell"),
            Recommendation::NoRating => write!(f, "none"),
            Recommendation::Other(key) => write!(f, "{}", key),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalSnapshot {
    pub symbol: String,
    pub recommendation: Option<Recommendation>,
    /// Carried for reporting; not part of the admission check.
    pub peg_ratio: Option<f64>,
}

impl FundamentalSnapshot {
    pub fn from_info(symbol: &str, info: FundamentalInfo) -> Self {
        Self {
            symbol: symbol.to_string(),
            recommendation: info
                .recommendation_key
                .as_deref()
                .filter(|k| !k.trim().is_empty())
                .map(Recommendation::from_key),
            peg_ratio: info.peg_ratio.filter(|p| p.is_finite()),
        }
    }
}

/// Single lookup against the fundamentals provider.
pub fn evaluate_fundamentals(
    provider: &dyn FundamentalsProvider,
    symbol: &str,
) -> Result<FundamentalSnapshot, ScreenerError> {
    let info = provider.fetch_info(symbol)?;
    Ok(FundamentalSnapshot::from_info(symbol, info))
}
