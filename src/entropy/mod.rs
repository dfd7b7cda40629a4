//! Shannon entropy over byte-value histograms.
//!
//! Entropy is a packing/encryption heuristic: plain text usually lands
//! between 3 and 5 bits per byte, compressed or encrypted data close to 8.
//! The engine reports the raw number; interpreting it is left to consumers.
//!
//! # Example
//!
//! ```
//! use staticlens::entropy::shannon_entropy;
//!
//! assert_eq!(shannon_entropy(b""), 0.0);
//! assert_eq!(shannon_entropy(b"AAAA"), 0.0);
//! assert!((shannon_entropy(b"ABAB") - 1.0).abs() < 1e-12);
//! ```

pub mod core;

pub use self::core::{shannon_entropy, Histogram};

/// Upper bound of byte entropy in bits.
pub const MAX_ENTROPY: f64 = 8.0;
