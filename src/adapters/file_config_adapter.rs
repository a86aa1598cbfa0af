//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCREEN_INI: &str = r#"
[screen]
benchmark = ^NSEI
window_days = 365
percentile_threshold = 0.6
ema_spans = 50,150

[data]
price_dir = stockdata
fundamentals_file = fundamentals.csv
"#;

    #[test]
    fn from_string_parses_config() {
        let adapter = FileConfigAdapter::from_string(SCREEN_INI).unwrap();
        assert_eq!(
            adapter.get_string("screen", "benchmark"),
            Some("^NSEI".to_string())
        );
        assert_eq!(
            adapter.get_string("screen", "ema_spans"),
            Some("50,150".to_string())
        );
        assert_eq!(
            adapter.get_string("data", "price_dir"),
            Some("stockdata".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string(SCREEN_INI).unwrap();
        assert_eq!(adapter.get_string("screen", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_nonempty_skips_blank_values() {
        let adapter = FileConfigAdapter::from_string("[data]\ncache_dir =\n").unwrap();
        assert_eq!(adapter.get_nonempty("data", "cache_dir"), None);
    }

    #[test]
    fn get_int_returns_value_or_default() {
        let adapter = FileConfigAdapter::from_string(SCREEN_INI).unwrap();
        assert_eq!(adapter.get_int("screen", "window_days", 0), 365);
        assert_eq!(adapter.get_int("screen", "workers", 4), 4);
    }

    #[test]
    fn get_int_returns_default_for_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[screen]\nworkers = many\n").unwrap();
        assert_eq!(adapter.get_int("screen", "workers", 4), 4);
    }

    #[test]
    fn get_double_returns_value_or_default() {
        let adapter = FileConfigAdapter::from_string(SCREEN_INI).unwrap();
        assert_eq!(adapter.get_double("screen", "percentile_threshold", 0.0), 0.6);
        assert_eq!(adapter.get_double("screen", "floor_multiplier", 1.3), 1.3);
    }

    #[test]
    fn get_double_returns_default_for_non_numeric() {
        let adapter =
            FileConfigAdapter::from_string("[screen]\nfloor_multiplier = high\n").unwrap();
        assert_eq!(adapter.get_double("screen", "floor_multiplier", 1.3), 1.3);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", SCREEN_INI).unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "fundamentals_file"),
            Some("fundamentals.csv".to_string())
        );
    }

    #[test]
    fn from_file_returns_error_for_missing_file() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/screen.ini");
        assert!(result.is_err());
    }
}
