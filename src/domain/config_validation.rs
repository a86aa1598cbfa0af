//! Configuration validation.
//!
//! Validates all config fields before a screen runs.

use crate::domain::error::ScreenerError;
use crate::domain::selection::QuantileMethod;
use crate::domain::universe::parse_codes;
use crate::ports::config_port::ConfigPort;
use std::fs;
use std::path::Path;

pub fn validate_screen_config(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    validate_benchmark(config)?;
    validate_window(config)?;
    validate_percentile_threshold(config)?;
    validate_quantile_method(config)?;
    parse_ema_spans(config)?;
    validate_range_sessions(config)?;
    validate_multipliers(config)?;
    validate_workers(config)?;
    validate_codes(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    require(config, "data", "price_dir")?;
    require(config, "data", "fundamentals_file")?;
    if config.get_nonempty("screen", "codes").is_none()
        && config.get_nonempty("data", "universe_file").is_none()
    {
        return Err(ScreenerError::ConfigMissing {
            section: "data".to_string(),
            key: "universe_file".to_string(),
        });
    }
    validate_cache_dir(config)
}

/// The cache rewrites `<dir>/<SYMBOL>.csv` with the fetched window only, so it
/// must not share a directory with the price source.
fn validate_cache_dir(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let (Some(price_dir), Some(cache_dir)) = (
        config.get_nonempty("data", "price_dir"),
        config.get_nonempty("data", "cache_dir"),
    ) else {
        return Ok(());
    };
    if same_dir(Path::new(&price_dir), Path::new(&cache_dir)) {
        return Err(ScreenerError::ConfigInvalid {
            section: "data".to_string(),
            key: "cache_dir".to_string(),
            reason: "cache_dir must differ from price_dir".to_string(),
        });
    }
    Ok(())
}

fn same_dir(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn require(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, ScreenerError> {
    config
        .get_nonempty(section, key)
        .ok_or_else(|| ScreenerError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })
}

fn invalid(key: &str, reason: impl Into<String>) -> ScreenerError {
    ScreenerError::ConfigInvalid {
        section: "screen".to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

/// `[screen] key` as an integer; unparseable values are rejected, not defaulted.
fn int_value(config: &dyn ConfigPort, key: &str, default: i64) -> Result<i64, ScreenerError> {
    match config.get_nonempty("screen", key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<i64>()
            .map_err(|_| invalid(key, format!("{key} must be an integer, got '{raw}'"))),
    }
}

fn float_value(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, ScreenerError> {
    match config.get_nonempty("screen", key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(key, format!("{key} must be a number, got '{raw}'"))),
    }
}

fn validate_benchmark(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    require(config, "screen", "benchmark").map(|_| ())
}

fn validate_window(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let value = int_value(config, "window_days", 365)?;
    if value <= 0 {
        return Err(invalid("window_days", "window_days must be positive"));
    }
    Ok(())
}

fn validate_percentile_threshold(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let value = float_value(config, "percentile_threshold", 0.60)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(
            "percentile_threshold",
            "percentile_threshold must be between 0 and 1",
        ));
    }
    Ok(())
}

fn validate_quantile_method(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    parse_quantile_method(config).map(|_| ())
}

pub fn parse_quantile_method(config: &dyn ConfigPort) -> Result<QuantileMethod, ScreenerError> {
    match config.get_nonempty("screen", "quantile_method") {
        None => Ok(QuantileMethod::default()),
        Some(s) => s.parse().map_err(|e: String| invalid("quantile_method", e)),
    }
}

/// Reads `ema_spans` as a `short,long` pair, defaulting to `50,150`.
pub fn parse_ema_spans(config: &dyn ConfigPort) -> Result<(usize, usize), ScreenerError> {
    let Some(raw) = config.get_nonempty("screen", "ema_spans") else {
        return Ok((50, 150));
    };

    let spans = raw
        .split(',')
        .map(|s| s.trim().parse::<usize>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid("ema_spans", "spans must be positive integers"))?;

    match spans.as_slice() {
        [short, long] if *short > 0 && short < long => Ok((*short, *long)),
        [_, _] => Err(invalid(
            "ema_spans",
            "short span must be positive and less than long span",
        )),
        _ => Err(invalid("ema_spans", "exactly two spans are required")),
    }
}

fn validate_range_sessions(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let value = int_value(config, "range_sessions", 260)?;
    if value <= 0 {
        return Err(invalid("range_sessions", "range_sessions must be positive"));
    }
    Ok(())
}

fn validate_multipliers(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let floor = float_value(config, "floor_multiplier", 1.3)?;
    if floor <= 0.0 {
        return Err(invalid("floor_multiplier", "floor_multiplier must be positive"));
    }
    let ceiling = float_value(config, "ceiling_multiplier", 0.75)?;
    if ceiling <= 0.0 {
        return Err(invalid(
            "ceiling_multiplier",
            "ceiling_multiplier must be positive",
        ));
    }
    Ok(())
}

fn validate_workers(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    let value = int_value(config, "workers", 4)?;
    if value < 1 {
        return Err(invalid("workers", "workers must be at least 1"));
    }
    Ok(())
}

fn validate_codes(config: &dyn ConfigPort) -> Result<(), ScreenerError> {
    match config.get_string("screen", "codes") {
        Some(codes) if !codes.trim().is_empty() => parse_codes(&codes)
            .map(|_| ())
            .map_err(|e| invalid("codes", e.to_string())),
        _ => Ok(()),
    }
}
