//! The analysis orchestrator.
//!
//! One [`Analyzer`] is built from an [`AnalysisConfig`] and may be shared by
//! any number of concurrent analyses. Each call walks the stages
//!
//! `Init -> Hashing -> EntropyComputation -> StringExtraction ->
//! PatternMatching -> [ScriptContentCapture] -> [ArchiveListing] -> Assembled`
//!
//! emitting one [`ProgressEvent`] before each stage and checking the
//! [`CancellationToken`] at every boundary. Archive failures are absorbed into
//! the report; any other failure aborts with a single [`AnalysisError`] and no
//! partial report.

mod cancel;
mod progress;
pub mod script;

pub use cancel::CancellationToken;
pub use progress::{
    FnProgress, NoProgress, ProgressEvent, ProgressSink, Stage, TracingProgress,
};

use crate::archive;
use crate::config::AnalysisConfig;
use crate::entropy::shannon_entropy;
use crate::error::{AnalysisError, Result};
use crate::hashing::sha256_digest;
use crate::io::{self, ByteBuffer, SourceMetadata};
use crate::report::{FileInfo, ReportBuilder, StaticAnalysisReport};
use crate::strings::{extract_strings, match_patterns, KeywordTable};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, info_span};

/// Bytes plus declared metadata for one analysis.
#[derive(Debug)]
pub struct AnalysisInput {
    pub buffer: ByteBuffer,
    pub metadata: SourceMetadata,
}

impl AnalysisInput {
    pub fn new(buffer: impl Into<ByteBuffer>, metadata: SourceMetadata) -> Self {
        Self {
            buffer: buffer.into(),
            metadata,
        }
    }

    /// In-memory input whose declared size is the buffer length.
    pub fn from_bytes(name: impl Into<String>, buffer: impl Into<ByteBuffer>) -> Self {
        let buffer = buffer.into();
        let metadata = SourceMetadata::new(name, buffer.len() as u64);
        Self { buffer, metadata }
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.metadata.mime_type = mime.into();
        self
    }

    /// Reads a file from disk, deriving metadata from the filesystem.
    pub fn from_path<P: AsRef<Path>>(path: P, limits: &io::IOLimits) -> Result<Self> {
        let (buffer, metadata) = io::load_path(path, limits)?;
        Ok(Self { buffer, metadata })
    }
}

/// Stateless analysis engine over an immutable configuration.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: Arc<AnalysisConfig>,
    keywords: KeywordTable,
}

impl Analyzer {
    /// Validates `config` and prebuilds the keyword matcher.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        let keywords = KeywordTable::new(&config.patterns.keywords)?;
        Ok(Self {
            config: Arc::new(config),
            keywords,
        })
    }

    /// Analyzer over the built-in tables.
    pub fn with_defaults() -> Result<Self> {
        Self::new(AnalysisConfig::default())
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Whether `report` exceeds the configured `entropy.high_threshold`.
    pub fn is_high_entropy(&self, report: &StaticAnalysisReport) -> bool {
        report.is_high_entropy(self.config.entropy.high_threshold)
    }

    /// Runs the full pipeline over `input`.
    pub fn analyze(
        &self,
        input: &AnalysisInput,
        progress: &mut dyn ProgressSink,
    ) -> Result<StaticAnalysisReport> {
        self.analyze_with_cancel(input, progress, &CancellationToken::new())
    }

    /// Loads `path` with the configured limits and analyzes it.
    pub fn analyze_path<P: AsRef<Path>>(
        &self,
        path: P,
        progress: &mut dyn ProgressSink,
    ) -> Result<StaticAnalysisReport> {
        let input = AnalysisInput::from_path(path, &self.config.io)?;
        self.analyze(&input, progress)
    }

    /// Runs the pipeline, abandoning it at the next stage boundary once
    /// `cancel` is tripped.
    pub fn analyze_with_cancel(
        &self,
        input: &AnalysisInput,
        progress: &mut dyn ProgressSink,
        cancel: &CancellationToken,
    ) -> Result<StaticAnalysisReport> {
        let data: &[u8] = &input.buffer;
        let meta = &input.metadata;
        let cfg = &*self.config;

        let span = info_span!("analysis", name = %meta.name, size = data.len());
        let _guard = span.enter();
        let started = Instant::now();

        let mut enter = |stage: Stage| -> Result<()> {
            if cancel.is_cancelled() {
                debug!(%stage, "Analysis cancelled");
                return Err(AnalysisError::Cancelled { stage });
            }
            debug!(%stage, elapsed_us = started.elapsed().as_micros() as u64, "Entering stage");
            progress.on_progress(&ProgressEvent::new(stage));
            Ok(())
        };

        let mut report = ReportBuilder::new(FileInfo::from(meta));

        enter(Stage::Hashing)?;
        report = report.sha256(sha256_digest(data));

        enter(Stage::EntropyComputation)?;
        report = report.entropy(shannon_entropy(data));

        enter(Stage::StringExtraction)?;
        let strings = extract_strings(data, cfg.strings.min_length);

        enter(Stage::PatternMatching)?;
        let matches = match_patterns(&self.keywords, &strings);
        report = report
            .strings(strings)
            .patterns(matches.keywords, matches.indicators);

        if cfg.script.matches(&meta.name) {
            enter(Stage::ScriptContentCapture)?;
            report = report.text_content(script::decode_text_prefix(
                data,
                cfg.script.text_content_limit,
            ));
        }

        if archive::is_archive(&meta.name, &meta.mime_type, &cfg.archive) {
            enter(Stage::ArchiveListing)?;
            report = report.archive_contents(archive::list_entries_or_sentinel(
                data,
                &cfg.archive.error_sentinel,
            ));
        }

        enter(Stage::Assembled)?;
        let report = report.build()?;

        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            entropy = report.entropy,
            strings = report.strings.len(),
            keywords = report.suspicious_keywords.len(),
            urls = report.extracted_urls.len(),
            "Analysis complete"
        );
        Ok(report)
    }
}

/// Analyzes an in-memory buffer with the built-in tables.
///
/// Takes ownership of `data`; a borrowed slice must be copied by the caller
/// (`data.to_vec()`), static byte strings are used in place.
pub fn analyze_bytes(
    name: &str,
    mime_type: &str,
    data: impl Into<ByteBuffer>,
    progress: &mut dyn ProgressSink,
) -> Result<StaticAnalysisReport> {
    let input = AnalysisInput::from_bytes(name, data).with_mime_type(mime_type);
    Analyzer::with_defaults()?.analyze(&input, progress)
}

/// Analyzes a file on disk with the built-in tables.
pub fn analyze_path<P: AsRef<Path>>(
    path: P,
    progress: &mut dyn ProgressSink,
) -> Result<StaticAnalysisReport> {
    Analyzer::with_defaults()?.analyze_path(path, progress)
}
