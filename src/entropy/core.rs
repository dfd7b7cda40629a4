//! Byte histogram and Shannon entropy primitives.

/// Calculates the Shannon entropy of a byte slice in bits per byte.
///
/// Returns a value between 0.0 and 8.0, where:
/// - 0.0 means no randomness (empty input, or every byte identical)
/// - 8.0 means a perfectly uniform distribution over all 256 values
///
/// The result is never clamped; a value outside [0, 8] indicates a bug.
#[inline]
pub fn shannon_entropy(data: &[u8]) -> f64 {
    Histogram::from_bytes(data).entropy()
}

/// Byte frequency histogram over the 256 possible byte values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; 256],
    total: u64,
}

impl Histogram {
    /// Creates a new empty histogram.
    #[inline]
    pub fn new() -> Self {
        Self {
            counts: [0; 256],
            total: 0,
        }
    }

    /// Builds a histogram from a byte slice in a single pass.
    #[inline]
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut hist = Self::new();
        hist.extend(data);
        hist
    }

    /// Adds a single byte.
    #[inline]
    pub fn add(&mut self, byte: u8) {
        self.counts[byte as usize] += 1;
        self.total += 1;
    }

    /// Adds every byte of `data`.
    #[inline]
    pub fn extend(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
        self.total += data.len() as u64;
    }

    /// Occurrences of `byte`.
    #[inline]
    pub fn count(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of byte values that occur at least once.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Shannon entropy of the current histogram.
    ///
    /// Zero buckets are skipped so `0 * log2(0)` never has to be evaluated.
    pub fn entropy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }

        let total = self.total as f64;
        let mut entropy = 0.0;

        for &count in &self.counts {
            if count == 0 {
                continue;
            }
            let p = (count as f64) / total;
            entropy -= p * p.log2();
        }

        entropy
    }

    /// Total number of bytes recorded.
    #[inline]
    pub fn len(&self) -> u64 {
        self.total
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}
