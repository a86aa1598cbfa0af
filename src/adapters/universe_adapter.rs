//! Universe sources: a constituents file or a fixed code list.

use crate::domain::error::ScreenerError;
use crate::domain::universe::{parse_codes, UniverseError};
use crate::ports::universe_port::UniverseProvider;
use std::fs;
use std::path::PathBuf;

/// Reads constituents from a CSV file with a `Symbol` column.
///
/// A file without a `Symbol` header is read as one symbol per line.
pub struct CsvUniverseAdapter {
    path: PathBuf,
}

impl CsvUniverseAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl UniverseProvider for CsvUniverseAdapter {
    fn fetch_universe(&self) -> Result<Vec<String>, ScreenerError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            UniverseError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = rdr.headers()?.clone();
        let Some(column) = headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case("symbol"))
        else {
            return Ok(content
                .lines()
                .map(|l| l.trim().to_string())
                .filter(|l| !l.is_empty())
                .collect());
        };

        let mut symbols = Vec::new();
        for record in rdr.records() {
            let record = record?;
            if let Some(symbol) = record.get(column) {
                symbols.push(symbol.trim().to_string());
            }
        }
        Ok(symbols)
    }
}

/// Universe taken from a comma-separated code list.
pub struct StaticUniverse {
    codes: Vec<String>,
}

impl StaticUniverse {
    pub fn new(codes: Vec<String>) -> Self {
        Self { codes }
    }

    pub fn parse(input: &str) -> Result<Self, UniverseError> {
        Ok(Self::new(parse_codes(input)?))
    }
}

impl UniverseProvider for StaticUniverse {
    fn fetch_universe(&self) -> Result<Vec<String>, ScreenerError> {
        Ok(self.codes.clone())
    }
}
