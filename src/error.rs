//! Error types for the staticlens analysis engine.
//!
//! Only fatal conditions are represented here. Degraded results (for example
//! an unreadable archive) are carried inside the report itself and never
//! surface as an `AnalysisError`.

use crate::analysis::Stage;
use crate::io::error::IoError;
use thiserror::Error;

/// Main error type for staticlens operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The source could not be read into a buffer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source exceeds the configured size limit
    #[error("File size of {found} bytes exceeds the maximum allowed size of {limit} bytes")]
    FileTooLarge { limit: u64, found: u64 },

    /// The caller abandoned the analysis before it reached `stage`
    #[error("Analysis cancelled before stage {stage}")]
    Cancelled { stage: Stage },

    /// Caller-side deadline elapsed
    #[error("Analysis timeout after {millis}ms")]
    Timeout { millis: u64 },

    /// Configuration rejected at load or validation time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A report was assembled without one of its mandatory parts
    #[error("Incomplete report: missing {0}")]
    Incomplete(&'static str),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for staticlens operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

impl From<IoError> for AnalysisError {
    fn from(err: IoError) -> Self {
        match err {
            IoError::FileTooLarge { limit, found } => AnalysisError::FileTooLarge { limit, found },
            IoError::StdIo(e) => AnalysisError::Io(e),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(err: serde_json::Error) -> Self {
        AnalysisError::Serialization(err.to_string())
    }
}

impl AnalysisError {
    /// Whether this error came from the caller abandoning the analysis.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            AnalysisError::Cancelled { .. } | AnalysisError::Timeout { .. }
        )
    }
}
