//! Configuration for the analysis engine.
//!
//! Keyword and extension tables are plain data: they are loaded once,
//! validated, and handed to [`crate::analysis::Analyzer::new`]. Nothing in
//! the engine reads global configuration.

use crate::archive::DEFAULT_ERROR_SENTINEL;
use crate::error::{AnalysisError, Result};
use crate::io::IOLimits;
use crate::strings::StringsConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Built-in suspicious keyword table, version 1.
///
/// Process/injection APIs, scripting engines, network primitives, malware
/// vocabulary and protocol prefixes. Matching is case-insensitive and literal.
pub const DEFAULT_KEYWORDS: &[&str] = &[
    "eval",
    "exec",
    "Shell",
    "PowerShell",
    "cmd.exe",
    "Invoke-",
    "rundll32",
    "DownloadString",
    "FromBase64String",
    "GetProcAddress",
    "LoadLibrary",
    "CreateProcess",
    "CreateRemoteThread",
    "VirtualAlloc",
    "WriteProcessMemory",
    "RegWrite",
    "RegOpenKey",
    "SetWindowsHook",
    "keylogger",
    "trojan",
    "malware",
    "exploit",
    "CVE-",
    "rootkit",
    "http://",
    "https://",
    "socket",
    "bind",
    "listen",
    "connect",
    ".onion",
    "C2 server",
];

/// Extensions whose text is captured into the report.
pub const DEFAULT_SCRIPT_EXTENSIONS: &[&str] = &[".js", ".py", ".ps1", ".bat", ".sh", ".vbs"];

/// Master configuration for the analysis pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Source loading limits.
    pub io: IOLimits,
    /// String extraction.
    pub strings: StringsConfig,
    /// Keyword matching.
    pub patterns: PatternConfig,
    /// Script text capture.
    pub script: ScriptConfig,
    /// Archive listing.
    pub archive: ArchiveConfig,
    /// Entropy interpretation hints for consumers.
    pub entropy: EntropyConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Suspicious keywords, original case
    pub keywords: Vec<String>,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptConfig {
    /// Lower-case file name suffixes, each starting with '.'
    pub extensions: Vec<String>,
    /// Maximum number of characters of decoded text kept in the report
    pub text_content_limit: usize,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_SCRIPT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            text_content_limit: 65_536,
        }
    }
}

impl ScriptConfig {
    /// Whether `name` carries one of the configured script extensions.
    pub fn matches(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.extensions
            .iter()
            .any(|ext| lower.ends_with(&ext.to_lowercase()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Declared MIME types that mark a ZIP container
    pub mime_types: Vec<String>,
    /// File name suffixes that mark a ZIP container
    pub extensions: Vec<String>,
    /// Single entry reported when listing fails
    pub error_sentinel: String,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            mime_types: vec!["application/zip".to_string()],
            extensions: vec![".zip".to_string()],
            error_sentinel: DEFAULT_ERROR_SENTINEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntropyConfig {
    /// Entropy above which consumers usually treat data as packed or encrypted
    pub high_threshold: f64,
}

impl Default for EntropyConfig {
    fn default() -> Self {
        Self {
            high_threshold: 7.5,
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: Self =
            toml::from_str(s).map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: Self =
            serde_json::from_str(s).map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Loads a `.toml` or `.json` configuration file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&text),
            Some("json") => Self::from_json_str(&text),
            other => Err(AnalysisError::InvalidConfig(format!(
                "unsupported config extension {:?} for {}",
                other,
                path.display()
            ))),
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| AnalysisError::Serialization(e.to_string()))
    }

    /// Checks invariants serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.strings.min_length == 0 {
            return Err(AnalysisError::InvalidConfig(
                "strings.min_length must be at least 1".to_string(),
            ));
        }
        for kw in &self.patterns.keywords {
            if kw.is_empty() || kw.contains('\n') {
                return Err(AnalysisError::InvalidConfig(format!(
                    "invalid keyword {kw:?}"
                )));
            }
        }
        for ext in self.script.extensions.iter().chain(&self.archive.extensions) {
            if !ext.starts_with('.') || ext.len() < 2 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "extension {ext:?} must start with '.'"
                )));
            }
        }
        Ok(())
    }
}
