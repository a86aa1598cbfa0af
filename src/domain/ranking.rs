//! Relative-strength ranking against the benchmark.
//!
//! Each symbol's return multiplier is divided by the benchmark's and rounded
//! to two decimals. The ratios are then ranked across the whole universe with
//! average-rank tie-breaking and scaled to a (0, 100] percentile
//! (`avg_rank / n * 100`). Symbols without a multiplier keep a record but
//! take no rank slot.

use crate::domain::price::round2;
use crate::domain::returns::ReturnProfile;

#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    pub symbol: String,
    pub return_ratio: Option<f64>,
    pub percentile_score: Option<f64>,
}

/// Ratio of a symbol's multiplier to the benchmark's, rounded to 2 dp.
pub fn return_ratio(multiplier: f64, benchmark_multiplier: f64) -> f64 {
    round2(multiplier / benchmark_multiplier)
}

/// Ranks every profile against the benchmark. Output order follows `profiles`.
pub fn rank_relative_strength(
    benchmark_multiplier: f64,
    profiles: &[ReturnProfile],
) -> Vec<PerformanceRecord> {
    let ratios: Vec<Option<f64>> = profiles
        .iter()
        .map(|p| {
            p.multiplier
                .map(|m| return_ratio(m, benchmark_multiplier))
                .filter(|r| r.is_finite())
        })
        .collect();

    let scores = percentile_ranks(&ratios);

    profiles
        .iter()
        .zip(ratios)
        .zip(scores)
        .map(|((profile, return_ratio), percentile_score)| PerformanceRecord {
            symbol: profile.symbol.clone(),
            return_ratio,
            percentile_score,
        })
        .collect()
}

/// Average-rank percentile (0, 100] of each defined value among the defined values.
pub fn percentile_ranks(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut defined: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    defined.sort_by(|a, b| a.1.total_cmp(&b.1));

    let n = defined.len();
    let mut scores = vec![None; values.len()];

    let mut start = 0;
    while start < n {
        let mut end = start;
        while end + 1 < n && defined[end + 1].1 == defined[start].1 {
            end += 1;
        }
        // 1-based ranks start+1 ..= end+1 share their mean
        let avg_rank = (start + end) as f64 / 2.0 + 1.0;
        let score = avg_rank / n as f64 * 100.0;
        for &(idx, _) in &defined[start..=end] {
            scores[idx] = Some(score);
        }
        start = end + 1;
    }

    scores
}
