//! Property tests for the ranking, selection and indicator math.

mod common;

use common::*;
use proptest::prelude::*;
use relscreen::domain::fundamental::{FundamentalSnapshot, Recommendation};
use relscreen::domain::gate::{evaluate_gate, GateThresholds};
use relscreen::domain::indicator::ema::ema_adjusted;
use relscreen::domain::indicator::range::{range_high, range_low};
use relscreen::domain::ranking::{percentile_ranks, PerformanceRecord};
use relscreen::domain::selection::{quantile, select_performers, QuantileMethod};
use relscreen::domain::technical::TechnicalSnapshot;

fn method() -> impl Strategy<Value = QuantileMethod> {
    prop_oneof![Just(QuantileMethod::Lower), Just(QuantileMethod::Linear)]
}

fn maybe_ratios() -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::of(0.1f64..5.0), 0..40)
}

proptest! {
    #[test]
    fn percentiles_are_bounded(values in maybe_ratios()) {
        let scores = percentile_ranks(&values);
        prop_assert_eq!(scores.len(), values.len());
        for (value, score) in values.iter().zip(&scores) {
            prop_assert_eq!(value.is_some(), score.is_some());
            if let Some(s) = score {
                prop_assert!(*s > 0.0 && *s <= 100.0);
            }
        }
    }

    #[test]
    fn percentiles_preserve_order(values in maybe_ratios()) {
        let scores = percentile_ranks(&values);
        for i in 0..values.len() {
            for j in 0..values.len() {
                if let (Some(a), Some(b)) = (values[i], values[j]) {
                    let (sa, sb) = (scores[i].unwrap(), scores[j].unwrap());
                    if a < b {
                        prop_assert!(sa < sb);
                    } else if a == b {
                        prop_assert_eq!(sa, sb);
                    }
                }
            }
        }
    }

    #[test]
    fn selection_matches_threshold(
        values in maybe_ratios(),
        q in 0.0f64..=1.0,
        method in method(),
    ) {
        let scores = percentile_ranks(&values);
        let records: Vec<PerformanceRecord> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| PerformanceRecord {
                symbol: format!("S{i}"),
                return_ratio: values[i],
                percentile_score: *s,
            })
            .collect();

        let defined: Vec<f64> = scores.iter().flatten().copied().collect();
        let selected = select_performers(&records, q, method);

        match quantile(&defined, q, method) {
            None => prop_assert!(selected.is_empty()),
            Some(threshold) => {
                let expected: Vec<&PerformanceRecord> = records
                    .iter()
                    .filter(|r| r.percentile_score.is_some_and(|s| s >= threshold))
                    .collect();
                prop_assert_eq!(selected.iter().collect::<Vec<_>>(), expected);
            }
        }
    }

    #[test]
    fn ema_of_constant_is_constant(c in 1.0f64..10_000.0, len in 1usize..300, span in 1usize..200) {
        let values = vec![c; len];
        for v in ema_adjusted(&values, span) {
            prop_assert!((v - c).abs() <= c * 1e-9);
        }
    }

    #[test]
    fn ema_stays_within_input_range(
        values in prop::collection::vec(1.0f64..1000.0, 1..200),
        span in 1usize..200,
    ) {
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        for v in ema_adjusted(&values, span) {
            prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9);
        }
    }

    #[test]
    fn range_ignores_bars_outside_window(
        prices in prop::collection::vec(10.0f64..500.0, 20..60),
        sessions in 1usize..20,
        spike in 1000.0f64..5000.0,
    ) {
        let bars = bars_from_prices(&prices);
        let mut altered = bars.clone();
        // older than the window
        altered[0].high = spike;
        altered[0].low = 0.01;

        prop_assert_eq!(range_low(&bars, sessions), range_low(&altered, sessions));
        prop_assert_eq!(range_high(&bars, sessions), range_high(&altered, sessions));
        prop_assert!(range_low(&bars, sessions) <= range_high(&bars, sessions));
    }

    #[test]
    fn gate_requires_buy(
        price in 50.0f64..200.0,
        ema_short in 50.0f64..200.0,
        ema_long in 50.0f64..200.0,
        low in 10.0f64..200.0,
        high in 50.0f64..300.0,
        key in prop_oneof![
            Just("buy"), Just("strong_buy"), Just("hold"), Just("sell"), Just("none")
        ],
    ) {
        let technical = TechnicalSnapshot {
            symbol: "SYM".to_string(),
            latest_price: price,
            ema_short,
            ema_long,
            low_52w: low,
            high_52w: high,
        };
        let fundamental = FundamentalSnapshot {
            symbol: "SYM".to_string(),
            recommendation: Some(Recommendation::from_key(key)),
            peg_ratio: None,
        };
        let thresholds = GateThresholds::default();

        let outcome = evaluate_gate(&technical, &fundamental, &thresholds);
        prop_assert_eq!(outcome, evaluate_gate(&technical, &fundamental, &thresholds));
        if outcome.admitted() {
            prop_assert_eq!(key, "buy");
            prop_assert!(price > ema_short && ema_short > ema_long);
            prop_assert!(price >= 1.3 * low && price >= 0.75 * high);
        }
    }
}
