//! String extraction and pattern matching.
//!
//! The extractor walks the raw buffer once and yields printable ASCII runs;
//! the matchers consume those runs read-only:
//!
//! - [`keywords::KeywordTable`] counts configured suspicious tokens,
//! - [`indicators::extract_indicators`] harvests URLs and dotted quads.

mod config;
pub mod indicators;
pub mod keywords;
pub mod patterns;
pub mod scan;

pub use config::{StringsConfig, DEFAULT_MIN_LENGTH};
pub use indicators::extract_indicators;
pub use keywords::KeywordTable;
pub use scan::{extract_strings, is_printable, PrintableRun, PrintableRuns};

use crate::report::KeywordHit;

/// Output of the pattern matching stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternMatches {
    pub keywords: Vec<KeywordHit>,
    pub indicators: Vec<String>,
}

/// Runs both matchers over `strings`.
pub fn match_patterns(table: &KeywordTable, strings: &[String]) -> PatternMatches {
    PatternMatches {
        keywords: table.scan(strings.iter().map(String::as_str)),
        indicators: extract_indicators(strings.iter().map(String::as_str)),
    }
}
