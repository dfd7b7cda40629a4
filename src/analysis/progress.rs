//! Pipeline stages and progress delivery.

use serde::Serialize;
use std::fmt;
use tracing::info;

/// Pipeline stages in execution order.
///
/// `Init` is the state before the first stage runs; no event is delivered
/// for it. Every later stage gets exactly one event when it is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Stage {
    Init,
    Hashing,
    EntropyComputation,
    StringExtraction,
    PatternMatching,
    ScriptContentCapture,
    ArchiveListing,
    Assembled,
}

impl Stage {
    /// Short human-readable label. Wording may change between releases.
    pub fn label(self) -> &'static str {
        use Stage::*;
        match self {
            Init => "Preparing analysis...",
            Hashing => "Calculating hashes...",
            EntropyComputation => "Calculating entropy...",
            StringExtraction => "Extracting strings...",
            PatternMatching => "Matching keywords & indicators...",
            ScriptContentCapture => "Reading script content...",
            ArchiveListing => "Analyzing archive contents...",
            Assembled => "Assembling report...",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Delivered once per stage, before the stage runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub stage: Stage,
    pub label: &'static str,
}

impl ProgressEvent {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            label: stage.label(),
        }
    }
}

/// Receives progress events from the pipeline.
///
/// Delivery is advisory: sinks cannot fail the analysis, and a disconnected
/// channel simply drops events.
pub trait ProgressSink {
    fn on_progress(&mut self, event: &ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn on_progress(&mut self, _event: &ProgressEvent) {}
}

/// Logs every event at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn on_progress(&mut self, event: &ProgressEvent) {
        info!(stage = %event.stage, "{}", event.label);
    }
}

/// Adapts a closure into a sink.
pub struct FnProgress<F>(pub F);

impl<F: FnMut(&ProgressEvent)> ProgressSink for FnProgress<F> {
    fn on_progress(&mut self, event: &ProgressEvent) {
        (self.0)(event)
    }
}

/// Collects events in order.
impl ProgressSink for Vec<ProgressEvent> {
    fn on_progress(&mut self, event: &ProgressEvent) {
        self.push(event.clone());
    }
}

impl ProgressSink for std::sync::mpsc::Sender<ProgressEvent> {
    fn on_progress(&mut self, event: &ProgressEvent) {
        let _ = self.send(event.clone());
    }
}

impl ProgressSink for tokio::sync::mpsc::UnboundedSender<ProgressEvent> {
    fn on_progress(&mut self, event: &ProgressEvent) {
        let _ = self.send(event.clone());
    }
}
