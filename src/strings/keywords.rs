//! Case-insensitive literal keyword counting.
//!
//! Counts follow "join every extracted string with a newline, lower-case the
//! result, then count the non-overlapping occurrences of each keyword on its
//! own". The joined text is never built: one overlapping Aho-Corasick pass per
//! string feeds a per-keyword cursor that discards matches overlapping the
//! previous accepted match of the same keyword. Keywords are literal, so
//! characters such as `.`, `-` or `/` carry no pattern meaning.

use crate::error::{AnalysisError, Result};
use crate::report::KeywordHit;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashMap;
use tracing::debug;

/// Immutable, prebuilt keyword matcher.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    /// Configured keywords, original case, first occurrence of each kept
    keywords: Vec<String>,
    /// Keyword index -> automaton pattern index
    pattern_of: Vec<usize>,
    patterns: usize,
    automaton: Option<AhoCorasick>,
}

impl KeywordTable {
    /// Builds the table from the configured keyword list.
    ///
    /// Keywords must be non-empty and must not contain a newline. Exact
    /// duplicates are folded into their first occurrence; keywords that only
    /// differ in ASCII case share one automaton pattern but are reported
    /// separately.
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept: Vec<String> = Vec::new();
        let mut pattern_of: Vec<usize> = Vec::new();
        let mut folded: HashMap<String, usize> = HashMap::new();
        let mut patterns: Vec<String> = Vec::new();

        for kw in keywords {
            let kw = kw.as_ref();
            if kw.is_empty() {
                return Err(AnalysisError::InvalidConfig(
                    "keywords must not be empty".to_string(),
                ));
            }
            if kw.contains('\n') {
                return Err(AnalysisError::InvalidConfig(format!(
                    "keyword {kw:?} contains a newline"
                )));
            }
            if kept.iter().any(|k| k == kw) {
                continue;
            }
            let lower = kw.to_ascii_lowercase();
            let idx = match folded.get(&lower) {
                Some(&idx) => idx,
                None => {
                    patterns.push(lower.clone());
                    folded.insert(lower, patterns.len() - 1);
                    patterns.len() - 1
                }
            };
            kept.push(kw.to_string());
            pattern_of.push(idx);
        }

        let automaton = if patterns.is_empty() {
            None
        } else {
            let ac = AhoCorasick::builder()
                .ascii_case_insensitive(true)
                .match_kind(MatchKind::Standard)
                .build(&patterns)
                .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
            Some(ac)
        };

        debug!(
            keywords = kept.len(),
            patterns = patterns.len(),
            "Built keyword table"
        );

        Ok(Self {
            keywords: kept,
            pattern_of,
            patterns: patterns.len(),
            automaton,
        })
    }

    /// Configured keywords in table order.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Counts keyword occurrences across `strings`.
    ///
    /// Returns one hit per keyword with a non-zero count, sorted by count
    /// descending; equal counts keep configured order.
    pub fn scan<'s, I>(&self, strings: I) -> Vec<KeywordHit>
    where
        I: IntoIterator<Item = &'s str>,
    {
        let Some(ac) = &self.automaton else {
            return Vec::new();
        };

        let mut counts = vec![0u64; self.patterns];
        // (string number, end of last accepted match) per pattern
        let mut cursor: Vec<(usize, usize)> = vec![(0, 0); self.patterns];

        for (n, text) in strings.into_iter().enumerate() {
            let generation = n + 1;
            for m in ac.find_overlapping_iter(text) {
                let p = m.pattern().as_usize();
                let (gen, last_end) = cursor[p];
                if gen == generation && m.start() < last_end {
                    continue;
                }
                cursor[p] = (generation, m.end());
                counts[p] += 1;
            }
        }

        let mut hits: Vec<KeywordHit> = self
            .keywords
            .iter()
            .zip(&self.pattern_of)
            .filter_map(|(kw, &p)| {
                let count = counts[p];
                (count > 0).then(|| KeywordHit {
                    keyword: kw.clone(),
                    count,
                })
            })
            .collect();
        // Stable: ties keep configured order
        hits.sort_by(|a, b| b.count.cmp(&a.count));
        hits
    }
}
