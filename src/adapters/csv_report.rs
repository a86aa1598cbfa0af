//! CSV export of screen results.

use crate::domain::aggregate::{ScreenResult, RESULT_COLUMNS};
use crate::domain::error::ScreenerError;
use crate::ports::report_port::ReportPort;
use std::path::PathBuf;

pub struct CsvReportAdapter {
    path: PathBuf,
}

impl CsvReportAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, results: &[ScreenResult]) -> Result<(), ScreenerError> {
        let mut wtr = csv::Writer::from_path(&self.path)?;
        if results.is_empty() {
            wtr.write_record(RESULT_COLUMNS)?;
        }
        for result in results {
            wtr.serialize(result)?;
        }
        wtr.flush()?;
        Ok(())
    }
}
