//! The static analysis report handed to downstream classifiers.
//!
//! A report is immutable once built. [`ReportBuilder`] collects stage outputs
//! as the pipeline runs and only yields a [`StaticAnalysisReport`] when every
//! mandatory part is present.

use crate::error::{AnalysisError, Result};
use crate::io::SourceMetadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Source file facts, derived once from the input metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    /// Declared MIME type, possibly empty
    #[serde(rename = "type")]
    pub mime_type: String,
    pub last_modified: DateTime<Utc>,
}

impl From<&SourceMetadata> for FileInfo {
    fn from(meta: &SourceMetadata) -> Self {
        Self {
            name: meta.name.clone(),
            size: meta.declared_size,
            mime_type: meta.mime_type.clone(),
            last_modified: meta.last_modified,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hashes {
    /// 64-character lowercase hex SHA-256 digest
    pub sha256: String,
}

/// A configured keyword and how often it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub keyword: String,
    pub count: u64,
}

/// Feature report for one analyzed source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticAnalysisReport {
    pub file_info: FileInfo,
    pub hashes: Hashes,
    /// Shannon entropy in bits per byte, 0.0 ..= 8.0
    pub entropy: f64,
    pub strings: Vec<String>,
    pub suspicious_keywords: Vec<KeywordHit>,
    pub extracted_urls: Vec<String>,
    /// Decoded prefix of recognized script files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    /// Entry names of recognized archives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archive_contents: Option<Vec<String>>,
}

impl StaticAnalysisReport {
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Whether entropy exceeds `threshold` (typically 7.5, the usual
    /// packed/encrypted cut-off).
    pub fn is_high_entropy(&self, threshold: f64) -> bool {
        self.entropy > threshold
    }

    /// One-line description for logs.
    pub fn summary_line(&self) -> String {
        format!(
            "{} ({} bytes) sha256={} entropy={:.4} strings={} keywords={} urls={}",
            self.file_info.name,
            self.file_info.size,
            self.hashes.sha256,
            self.entropy,
            self.strings.len(),
            self.suspicious_keywords.len(),
            self.extracted_urls.len()
        )
    }
}

/// Collects stage outputs; consumed by [`ReportBuilder::build`].
#[derive(Debug, Default)]
pub struct ReportBuilder {
    file_info: Option<FileInfo>,
    sha256: Option<String>,
    entropy: Option<f64>,
    strings: Option<Vec<String>>,
    suspicious_keywords: Option<Vec<KeywordHit>>,
    extracted_urls: Option<Vec<String>>,
    text_content: Option<String>,
    archive_contents: Option<Vec<String>>,
}

impl ReportBuilder {
    pub fn new(file_info: FileInfo) -> Self {
        Self {
            file_info: Some(file_info),
            ..Default::default()
        }
    }

    pub fn sha256(mut self, digest: String) -> Self {
        self.sha256 = Some(digest);
        self
    }

    pub fn entropy(mut self, entropy: f64) -> Self {
        self.entropy = Some(entropy);
        self
    }

    pub fn strings(mut self, strings: Vec<String>) -> Self {
        self.strings = Some(strings);
        self
    }

    pub fn patterns(mut self, keywords: Vec<KeywordHit>, urls: Vec<String>) -> Self {
        self.suspicious_keywords = Some(keywords);
        self.extracted_urls = Some(urls);
        self
    }

    pub fn text_content(mut self, text: String) -> Self {
        self.text_content = Some(text);
        self
    }

    pub fn archive_contents(mut self, entries: Vec<String>) -> Self {
        self.archive_contents = Some(entries);
        self
    }

    /// Produces the report, or names the first missing mandatory part.
    pub fn build(self) -> Result<StaticAnalysisReport> {
        Ok(StaticAnalysisReport {
            file_info: self.file_info.ok_or(AnalysisError::Incomplete("fileInfo"))?,
            hashes: Hashes {
                sha256: self.sha256.ok_or(AnalysisError::Incomplete("hashes.sha256"))?,
            },
            entropy: self.entropy.ok_or(AnalysisError::Incomplete("entropy"))?,
            strings: self.strings.ok_or(AnalysisError::Incomplete("strings"))?,
            suspicious_keywords: self
                .suspicious_keywords
                .ok_or(AnalysisError::Incomplete("suspiciousKeywords"))?,
            extracted_urls: self
                .extracted_urls
                .ok_or(AnalysisError::Incomplete("extractedUrls"))?,
            text_content: self.text_content,
            archive_contents: self.archive_contents,
        })
    }
}
