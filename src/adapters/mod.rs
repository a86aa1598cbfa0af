//! Concrete adapter implementations for ports.

pub mod csv_adapter;
pub mod csv_report;
pub mod file_config_adapter;
pub mod fundamentals_adapter;
pub mod table_report;
pub mod universe_adapter;
