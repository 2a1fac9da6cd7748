use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Clusters searched concurrently with the environment heuristic.
pub const PRIMARY_WIDTH: usize = 3;

/// Clusters searched concurrently with the naming heuristic when the
/// primary phase comes back short.
pub const FALLBACK_WIDTH: usize = 5;

/// Primary results below this count trigger the fallback phase.
pub const MIN_PRIMARY_RESULTS: usize = 3;

/// Knobs for the staged cluster search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Fan-out width of the primary phase
    pub primary_width: usize,

    /// Fan-out width of the fallback phase
    pub fallback_width: usize,

    /// Minimum primary results that make the fallback unnecessary
    pub min_primary_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            primary_width: PRIMARY_WIDTH,
            fallback_width: FALLBACK_WIDTH,
            min_primary_results: MIN_PRIMARY_RESULTS,
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw).map_err(|err| match err {
            SearchError::ConfigParse(inner) => {
                SearchError::invalid_config(format!("{}: {inner}", path.display()))
            }
            other => other,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.primary_width == 0 {
            return Err(SearchError::invalid_config("primary_width must be > 0"));
        }
        if self.fallback_width == 0 {
            return Err(SearchError::invalid_config("fallback_width must be > 0"));
        }
        if self.min_primary_results == 0 {
            return Err(SearchError::invalid_config(
                "min_primary_results must be > 0",
            ));
        }
        Ok(())
    }
}
