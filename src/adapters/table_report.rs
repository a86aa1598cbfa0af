//! Fixed-width console table for screen results.

use crate::domain::aggregate::{ScreenResult, RESULT_COLUMNS};
use crate::domain::error::ScreenerError;
use crate::ports::report_port::ReportPort;
use std::io::Write;

/// Renders rows under the standard column headers. Numbers are printed with
/// two decimals; every column is right-aligned to its widest cell.
pub fn render_table(results: &[ScreenResult]) -> String {
    let rows: Vec<[String; 8]> = results
        .iter()
        .map(|r| {
            [
                r.ticker.clone(),
                format!("{:.2}", r.latest_price),
                format!("{:.2}", r.score),
                format!("{:.2}", r.ema50),
                format!("{:.2}", r.ema150),
                format!("{:.2}", r.high52w),
                format!("{:.2}", r.low52w),
                r.recommendation.clone(),
            ]
        })
        .collect();

    let mut widths: [usize; 8] = RESULT_COLUMNS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.len());
        }
    }

    let format_line = |cells: &[&str]| -> String {
        cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{:>w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join("  ")
    };

    let mut out = format_line(&RESULT_COLUMNS);
    out.push('\n');
    for row in &rows {
        let cells: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&format_line(&cells));
        out.push('\n');
    }
    out
}

/// Prints the table to stdout.
pub struct TableReportAdapter;

impl ReportPort for TableReportAdapter {
    fn write(&self, results: &[ScreenResult]) -> Result<(), ScreenerError> {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(render_table(results).as_bytes())?;
        if results.is_empty() {
            writeln!(handle, "(no symbols admitted)")?;
        }
        handle.flush()?;
        Ok(())
    }
}
