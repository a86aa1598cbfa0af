//! Final ranked watchlist.

use crate::domain::fundamental::FundamentalSnapshot;
use crate::domain::price::round2;
use crate::domain::ranking::PerformanceRecord;
use crate::domain::technical::TechnicalSnapshot;
use serde::Serialize;

/// A symbol that passed every admission condition.
#[derive(Debug, Clone)]
pub struct AdmittedSymbol {
    pub performance: PerformanceRecord,
    pub technical: TechnicalSnapshot,
    pub fundamental: FundamentalSnapshot,
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenResult {
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Latest_Price")]
    pub latest_price: f64,
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "Ema50")]
    pub ema50: f64,
    #[serde(rename = "Ema150")]
    pub ema150: f64,
    #[serde(rename = "52high")]
    pub high52w: f64,
    #[serde(rename = "52low")]
    pub low52w: f64,
    #[serde(rename = "Recomm")]
    pub recommendation: String,
}

pub const RESULT_COLUMNS: [&str; 8] = [
    "Ticker",
    "Latest_Price",
    "Score",
    "Ema50",
    "Ema150",
    "52high",
    "52low",
    "Recomm",
];

/// Builds rows sorted by score descending. The sort is stable, so ties keep
/// the order of `admitted` (universe order).
pub fn aggregate_results(admitted: &[AdmittedSymbol]) -> Vec<ScreenResult> {
    let mut rows: Vec<ScreenResult> = admitted
        .iter()
        .filter_map(|a| {
            let score = a.performance.percentile_score?;
            Some(ScreenResult {
                ticker: a.performance.symbol.clone(),
                latest_price: a.technical.latest_price,
                score: round2(score),
                ema50: a.technical.ema_short,
                ema150: a.technical.ema_long,
                high52w: a.technical.high_52w,
                low52w: a.technical.low_52w,
                recommendation: a
                    .fundamental
                    .recommendation
                    .as_ref()
                    .map(|r| r.to_string())
                    .unwrap_or_default(),
            })
        })
        .collect();

    rows.sort_by(|a, b| b.score.total_cmp(&a.score));
    rows
}
