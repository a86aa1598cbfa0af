//! CSV-backed fundamentals snapshot.
//!
//! Columns: `symbol,recommendationKey,pegRatio`. Blank cells mean the field
//! is absent for that symbol.

use crate::domain::error::ScreenerError;
use crate::ports::fundamentals_port::{FundamentalInfo, FundamentalsProvider};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FundamentalRow {
    symbol: String,
    #[serde(rename = "recommendationKey", default)]
    recommendation_key: Option<String>,
    #[serde(rename = "pegRatio", default)]
    peg_ratio: Option<f64>,
}

pub struct CsvFundamentalsAdapter {
    info: HashMap<String, FundamentalInfo>,
}

impl CsvFundamentalsAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScreenerError> {
        let rdr = csv::Reader::from_path(path)?;
        Self::from_reader(rdr)
    }

    pub fn from_string(content: &str) -> Result<Self, ScreenerError> {
        Self::from_reader(csv::Reader::from_reader(content.as_bytes()))
    }

    fn from_reader<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Self, ScreenerError> {
        let mut info = HashMap::new();
        for row in rdr.deserialize::<FundamentalRow>() {
            let row = row?;
            info.insert(
                row.symbol.trim().to_uppercase(),
                FundamentalInfo {
                    recommendation_key: row.recommendation_key.filter(|k| !k.trim().is_empty()),
                    peg_ratio: row.peg_ratio,
                },
            );
        }
        Ok(Self { info })
    }

    pub fn len(&self) -> usize {
        self.info.len()
    }

    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }
}

impl FundamentalsProvider for CsvFundamentalsAdapter {
    fn fetch_info(&self, symbol: &str) -> Result<FundamentalInfo, ScreenerError> {
        self.info
            .get(&symbol.to_uppercase())
            .cloned()
            .ok_or_else(|| ScreenerError::DataUnavailable {
                symbol: symbol.to_string(),
                field: "fundamentals".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "symbol,recommendationKey,pegRatio\n\
        TCS.NS,buy,1.8\n\
        itc.ns,hold,\n\
        WIPRO.NS,,2.4\n";

    #[test]
    fn loads_rows() {
        let adapter = CsvFundamentalsAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(adapter.len(), 3);

        let tcs = adapter.fetch_info("TCS.NS").unwrap();
        assert_eq!(tcs.recommendation_key.as_deref(), Some("buy"));
        assert_eq!(tcs.peg_ratio, Some(1.8));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let adapter = CsvFundamentalsAdapter::from_string(SAMPLE).unwrap();
        let itc = adapter.fetch_info("ITC.NS").unwrap();
        assert_eq!(itc.recommendation_key.as_deref(), Some("hold"));
        assert_eq!(itc.peg_ratio, None);
    }

    #[test]
    fn blank_recommendation_is_absent() {
        let adapter = CsvFundamentalsAdapter::from_string(SAMPLE).unwrap();
        let wipro = adapter.fetch_info("WIPRO.NS").unwrap();
        assert_eq!(wipro.recommendation_key, None);
    }

    #[test]
    fn unknown_symbol_is_unavailable() {
        let adapter = CsvFundamentalsAdapter::from_string(SAMPLE).unwrap();
        assert!(matches!(
            adapter.fetch_info("SBIN.NS"),
            Err(ScreenerError::DataUnavailable { .. })
        ));
    }
}
