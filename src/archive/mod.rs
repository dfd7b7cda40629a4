//! ZIP archive entry listing.
//!
//! Listing is best-effort enrichment: [`list_entries_or_sentinel`] never
//! fails, it replaces any parse error with a single human-readable entry.

use crate::config::ArchiveConfig;
use std::io::Cursor;
use tracing::{debug, warn};
use zip::result::ZipResult;
use zip::ZipArchive;

/// Entry substituted for the listing when the archive cannot be read.
pub const DEFAULT_ERROR_SENTINEL: &str = "Error reading archive contents.";

/// Whether a source should be treated as a ZIP container.
///
/// Fires when the declared MIME type is one of the configured archive types
/// or the lower-cased name ends with a configured archive extension. Content
/// is not consulted.
pub fn is_archive(name: &str, mime_type: &str, cfg: &ArchiveConfig) -> bool {
    if cfg.mime_types.iter().any(|m| m == mime_type) {
        return true;
    }
    let lower = name.to_lowercase();
    cfg.extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.to_lowercase()))
}

/// Lists entry names in central-directory order without extracting content.
pub fn list_zip_entries(data: &[u8]) -> ZipResult<Vec<String>> {
    let archive = ZipArchive::new(Cursor::new(data))?;
    let names = (0..archive.len())
        .filter_map(|i| archive.name_for_index(i))
        .map(str::to_string)
        .collect::<Vec<_>>();
    debug!(entries = names.len(), "Listed archive entries");
    Ok(names)
}

/// Lists entries, absorbing any failure into `[sentinel]`.
pub fn list_entries_or_sentinel(data: &[u8], sentinel: &str) -> Vec<String> {
    match list_zip_entries(data) {
        Ok(names) => names,
        Err(e) => {
            warn!(error = %e, size = data.len(), "Could not process ZIP archive");
            vec![sentinel.to_string()]
        }
    }
}
