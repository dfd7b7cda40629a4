//! Configuration for string extraction.

use serde::{Deserialize, Serialize};

/// Shortest run kept by the extractor.
pub const DEFAULT_MIN_LENGTH: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StringsConfig {
    /// Minimum length for a printable run (in bytes)
    pub min_length: usize,
}

impl Default for StringsConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
        }
    }
}
