//! Screening universe: code list parsing and normalisation.

use std::collections::BTreeSet;
use std::collections::HashSet;

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in code list")]
    EmptyToken,

    #[error("duplicate code: {0}")]
    DuplicateCode(String),

    #[error("universe is empty")]
    Empty,

    #[error("failed to load universe: {0}")]
    Unavailable(String),
}

/// Parses a comma-separated code list, keeping input order.
pub fn parse_codes(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut codes = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let code = trimmed.to_uppercase();
        if seen.contains(&code) {
            return Err(UniverseError::DuplicateCode(code));
        }
        seen.insert(code.clone());
        codes.push(code);
    }

    Ok(codes)
}

/// Trims, uppercases, sorts and deduplicates symbols fetched from a provider.
///
/// Blank entries are dropped. An empty result is an error since there is
/// nothing to screen.
pub fn normalize_universe<I, S>(symbols: I) -> Result<Vec<String>, UniverseError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let set: BTreeSet<String> = symbols
        .into_iter()
        .map(|s| s.as_ref().trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if set.is_empty() {
        return Err(UniverseError::Empty);
    }
    Ok(set.into_iter().collect())
}
