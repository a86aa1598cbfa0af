//! Trailing session range (52-week low/high).
//!
//! LOW(n) = min(L[t-n+1..=t]), HIGH(n) = max(H[t-n+1..=t]), rounded to 2 dp.
//! With fewer than n bars the whole series is used.

use crate::domain::price::{round2, PriceBar};

pub const SESSIONS_PER_WEEK: usize = 5;
pub const WEEKS_PER_YEAR: usize = 52;

/// Default lookback: 52 weeks of 5 sessions.
pub const DEFAULT_RANGE_SESSIONS: usize = WEEKS_PER_YEAR * SESSIONS_PER_WEEK;

fn window(bars: &[PriceBar], sessions: usize) -> &[PriceBar] {
    &bars[bars.len().saturating_sub(sessions)..]
}

pub fn range_low(bars: &[PriceBar], sessions: usize) -> Option<f64> {
    window(bars, sessions)
        .iter()
        .map(|b| b.low)
        .min_by(|a, b| a.total_cmp(b))
        .map(round2)
}

pub fn range_high(bars: &[PriceBar], sessions: usize) -> Option<f64> {
    window(bars, sessions)
        .iter()
        .map(|b| b.high)
        .max_by(|a, b| a.total_cmp(b))
        .map(round2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(lows_highs: &[(f64, f64)]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2).unwrap();
        lows_highs
            .iter()
            .enumerate()
            .map(|(i, &(low, high))| PriceBar {
                date: start + chrono::Duration::days(i as i64),
                open: low,
                high,
                low,
                close: high,
                adj_close: high,
                volume: 10,
            })
            .collect()
    }

    #[test]
    fn default_sessions() {
        assert_eq!(DEFAULT_RANGE_SESSIONS, 260);
    }

    #[test]
    fn only_trailing_window_counts() {
        let bars = make_bars(&[(1.0, 500.0), (10.0, 20.0), (12.0, 22.0), (11.0, 21.5)]);
        assert_eq!(range_low(&bars, 3), Some(10.0));
        assert_eq!(range_high(&bars, 3), Some(22.0));
        assert_eq!(range_low(&bars, 4), Some(1.0));
        assert_eq!(range_high(&bars, 4), Some(500.0));
    }

    #[test]
    fn short_history_uses_everything() {
        let bars = make_bars(&[(10.456, 20.004)]);
        assert_eq!(range_low(&bars, 260), Some(10.46));
        assert_eq!(range_high(&bars, 260), Some(20.0));
    }

    #[test]
    fn empty_is_none() {
        assert_eq!(range_low(&[], 260), None);
        assert_eq!(range_high(&[], 260), None);
    }
}
