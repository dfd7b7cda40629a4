//! Async host integration.
//!
//! The pipeline itself is synchronous. These helpers move it onto tokio's
//! blocking pool and let a host put its own deadline around it; the engine
//! imposes no timeouts of its own.

use crate::analysis::{AnalysisInput, Analyzer, CancellationToken, ProgressSink};
use crate::error::{AnalysisError, Result};
use crate::report::StaticAnalysisReport;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Runs one analysis on the blocking pool.
///
/// Tripping `cancel` makes the pipeline stop at its next stage boundary.
pub async fn analyze_async<S>(
    analyzer: Arc<Analyzer>,
    input: AnalysisInput,
    mut progress: S,
    cancel: CancellationToken,
) -> Result<StaticAnalysisReport>
where
    S: ProgressSink + Send + 'static,
{
    debug!(name = %input.metadata.name, "Scheduling analysis on blocking pool");
    tokio::task::spawn_blocking(move || analyzer.analyze_with_cancel(&input, &mut progress, &cancel))
        .await
        .map_err(|e| AnalysisError::Internal(format!("analysis task failed: {e}")))?
}

/// Awaits `future` for at most `deadline`.
///
/// On expiry `cancel` is tripped so a pipeline still running on another
/// thread winds down at its next stage boundary, and `Timeout` is returned.
pub async fn with_deadline<T, F>(
    deadline: Duration,
    cancel: &CancellationToken,
    future: F,
) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    match timeout(deadline, future).await {
        Ok(result) => result,
        Err(_) => {
            let millis = deadline.as_millis() as u64;
            warn!(millis, "Analysis deadline elapsed; cancelling");
            cancel.cancel();
            Err(AnalysisError::Timeout { millis })
        }
    }
}
