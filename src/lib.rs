//! Static feature extraction for arbitrary files.
//!
//! `staticlens` turns a raw byte buffer into a [`report::StaticAnalysisReport`]:
//! SHA-256, byte entropy, printable strings, suspicious keyword counts,
//! URL/IPv4 indicators, and, when applicable, script text and ZIP entry names.
//! Nothing is executed; the report is meant for a downstream classifier.
//!
//! ```
//! use staticlens::analysis::{AnalysisInput, Analyzer, NoProgress};
//!
//! let analyzer = Analyzer::with_defaults().unwrap();
//! let input = AnalysisInput::from_bytes("note.txt", b"eval( http://evil.test/x )".to_vec());
//! let report = analyzer.analyze(&input, &mut NoProgress).unwrap();
//! assert_eq!(report.extracted_urls, vec!["http://evil.test/x"]);
//! ```

pub mod analysis;
pub mod archive;
pub mod config;
pub mod entropy;
pub mod error;
pub mod hashing;
pub mod io;
pub mod logging;
pub mod report;
pub mod runtime;
pub mod strings;

pub use analysis::{analyze_bytes, analyze_path, AnalysisInput, Analyzer};
pub use config::AnalysisConfig;
pub use error::{AnalysisError, Result};
pub use report::StaticAnalysisReport;
