//! Report output port trait.

use crate::domain::aggregate::ScreenResult;
use crate::domain::error::ScreenerError;

/// Port for writing the screen result table.
pub trait ReportPort {
    fn write(&self, results: &[ScreenResult]) -> Result<(), ScreenerError>;
}
