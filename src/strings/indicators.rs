//! URL and dotted-quad harvesting over extracted strings.

use crate::strings::patterns::{RE_DOTTED_QUAD, RE_URL};
use std::collections::HashSet;

/// Kind of network indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Url,
    DottedQuad,
}

/// Harvests indicators from `strings`.
///
/// URL matches come first in scan order, followed by dotted-quad matches in
/// scan order; the combined list is then deduplicated keeping the first
/// occurrence of each token.
pub fn extract_indicators<'s, I>(strings: I) -> Vec<String>
where
    I: IntoIterator<Item = &'s str>,
    I::IntoIter: Clone,
{
    let strings = strings.into_iter();
    let mut seen: HashSet<&'s str> = HashSet::new();
    let mut out: Vec<String> = Vec::new();

    for kind in [IndicatorKind::Url, IndicatorKind::DottedQuad] {
        let re = match kind {
            IndicatorKind::Url => &*RE_URL,
            IndicatorKind::DottedQuad => &*RE_DOTTED_QUAD,
        };
        for text in strings.clone() {
            for m in re.find_iter(text) {
                if seen.insert(m.as_str()) {
                    out.push(m.as_str().to_string());
                }
            }
        }
    }
    out
}
