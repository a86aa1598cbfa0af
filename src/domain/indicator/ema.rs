//! Exponential Moving Average, bias-corrected ("adjust") form.
//!
//! a = 2/(n+1). EMA[t] = sum(w_i * C[t-i]) / sum(w_i) over i in 0..=t,
//! w_i = (1-a)^i. No warmup: the first value is C[0], later values weight
//! only the history actually present. Each output is rounded to 2 dp.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::price::{round2, PriceBar};

/// Unrounded adjusted EMA of `values`.
pub fn ema_adjusted(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return Vec::new();
    }
    let decay = 1.0 - 2.0 / (span as f64 + 1.0);
    let mut numerator = 0.0;
    let mut denominator = 0.0;

    values
        .iter()
        .map(|&v| {
            numerator = v + decay * numerator;
            denominator = 1.0 + decay * denominator;
            numerator / denominator
        })
        .collect()
}

/// EMA of the adjusted close, rounded to 2 dp per bar.
pub fn calculate_ema(bars: &[PriceBar], span: usize) -> IndicatorSeries {
    let closes: Vec<f64> = bars.iter().map(|b| b.adj_close).collect();
    let values = ema_adjusted(&closes, span)
        .into_iter()
        .zip(bars)
        .map(|(value, bar)| IndicatorPoint {
            date: bar.date,
            value: round2(value),
        })
        .collect();

    IndicatorSeries {
        indicator_type: IndicatorType::Ema(span),
        values,
    }
}
