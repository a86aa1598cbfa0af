//! Fundamentals port trait.

use crate::domain::error::ScreenerError;

/// Raw fields returned by a fundamentals lookup; either may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FundamentalInfo {
    pub recommendation_key: Option<String>,
    pub peg_ratio: Option<f64>,
}

pub trait FundamentalsProvider: Send + Sync {
    fn fetch_info(&self, symbol: &str) -> Result<FundamentalInfo, ScreenerError>;
}
