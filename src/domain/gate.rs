//! Technical + sentiment admission check.

use crate::domain::fundamental::{FundamentalSnapshot, Recommendation};
use crate::domain::technical::TechnicalSnapshot;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateThresholds {
    /// Price must be at least this multiple of the 52-week low.
    pub floor_multiplier: f64,
    /// Price must be at least this fraction of the 52-week high.
    pub ceiling_multiplier: f64,
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            floor_multiplier: 1.3,
            ceiling_multiplier: 0.75,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateOutcome {
    pub trend_aligned: bool,
    pub above_floor: bool,
    pub near_ceiling: bool,
    pub sentiment_ok: bool,
}

impl GateOutcome {
    pub fn admitted(&self) -> bool {
        self.trend_aligned && self.above_floor && self.near_ceiling && self.sentiment_ok
    }
}

pub fn evaluate_gate(
    technical: &TechnicalSnapshot,
    fundamental: &FundamentalSnapshot,
    thresholds: &GateThresholds,
) -> GateOutcome {
    let price = technical.latest_price;
    GateOutcome {
        trend_aligned: price > technical.ema_short && technical.ema_short > technical.ema_long,
        above_floor: price >= thresholds.floor_multiplier * technical.low_52w,
        near_ceiling: price >= thresholds.ceiling_multiplier * technical.high_52w,
        sentiment_ok: fundamental.recommendation == Some(Recommendation::Buy),
    }
}
