//! Percentile-threshold candidate selection.

use crate::domain::ranking::PerformanceRecord;
use std::fmt;
use std::str::FromStr;

/// How the threshold quantile is read off the sorted scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantileMethod {
    /// Element at `floor(q * (n - 1))`.
    #[default]
    Lower,
    /// Linear interpolation between the two neighbouring elements.
    Linear,
}

impl FromStr for QuantileMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lower" => Ok(QuantileMethod::Lower),
            "linear" => Ok(QuantileMethod::Linear),
            other => Err(format!("unknown quantile method '{other}' (expected lower or linear)")),
        }
    }
}

impl fmt::Display for QuantileMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantileMethod::Lower => write!(f, "lower"),
            QuantileMethod::Linear => write!(f, "linear"),
        }
    }
}

/// The `q`-quantile of `values`; `None` when `values` is empty.
pub fn quantile(values: &[f64], q: f64, method: QuantileMethod) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    match method {
        QuantileMethod::Lower => Some(sorted[lo]),
        QuantileMethod::Linear => {
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
        }
    }
}

/// Keeps records whose score is at or above the `q`-quantile of all defined
/// scores, in input order. Records without a score are never selected.
pub fn select_performers(
    records: &[PerformanceRecord],
    q: f64,
    method: QuantileMethod,
) -> Vec<PerformanceRecord> {
    let scores: Vec<f64> = records.iter().filter_map(|r| r.percentile_score).collect();
    let Some(threshold) = quantile(&scores, q, method) else {
        return Vec::new();
    };

    records
        .iter()
        .filter(|r| r.percentile_score.is_some_and(|s| s >= threshold))
        .cloned()
        .collect()
}
