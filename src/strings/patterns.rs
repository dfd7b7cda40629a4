//! Precompiled indicator regexes.
//!
//! Both patterns are heuristics for harvesting candidates, not validators.
//! Neither can match across a newline, so scanning extracted strings one at a
//! time yields the same matches as scanning them newline-joined.

use once_cell::sync::Lazy;
use regex::Regex;

/// `http://` or `https://` followed by everything up to whitespace, a quote,
/// an angle bracket or a backtick. The scheme is matched case-sensitively.
pub static RE_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"https?://[^\s"'<>`]+"#).expect("valid URL regex"));

/// Four groups of 1-3 ASCII digits separated by dots.
///
/// Octets are not range checked, so `999.1.1.1` matches too.
pub static RE_DOTTED_QUAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}"#)
        .expect("valid dotted quad regex")
});
