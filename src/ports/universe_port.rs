//! Universe port trait.

use crate::domain::error::ScreenerError;

pub trait UniverseProvider: Send + Sync {
    /// The benchmark's constituent symbols. A failure here aborts the run.
    fn fetch_universe(&self) -> Result<Vec<String>, ScreenerError>;
}
