//! Loading analysis sources into immutable buffers.
//!
//! Files are memory-mapped read-only so that even very large inputs are held
//! exactly once; every later stage borrows the same bytes. Source metadata
//! (name, size, MIME type, modification time) is captured at load time.

pub mod error;

use crate::io::error::{IoError, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::ops::Deref;
use std::path::Path;
use tracing::{debug, warn};

/// Number of leading bytes handed to content sniffing.
pub const MAX_SNIFF_SIZE: usize = 8192;

/// Defines the resource limits for loading a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IOLimits {
    /// The absolute maximum file size that can be opened.
    pub max_file_size: u64,
}

impl Default for IOLimits {
    fn default() -> Self {
        Self {
            max_file_size: 1024 * 1024 * 1024, // 1GB
        }
    }
}

/// Immutable bytes of one analyzed source.
#[derive(Debug)]
pub enum ByteBuffer {
    /// Heap-backed, cheaply clonable bytes
    Owned(Bytes),
    /// Read-only file mapping
    Mapped(Mmap),
}

impl ByteBuffer {
    pub fn len(&self) -> usize {
        self.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_ref().is_empty()
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        match self {
            ByteBuffer::Owned(b) => &b[..],
            ByteBuffer::Mapped(m) => &m[..],
        }
    }
}

impl Deref for ByteBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_ref()
    }
}

impl From<Bytes> for ByteBuffer {
    fn from(b: Bytes) -> Self {
        ByteBuffer::Owned(b)
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(v: Vec<u8>) -> Self {
        ByteBuffer::Owned(Bytes::from(v))
    }
}

impl From<&'static [u8]> for ByteBuffer {
    fn from(s: &'static [u8]) -> Self {
        ByteBuffer::Owned(Bytes::from_static(s))
    }
}

impl<const N: usize> From<&'static [u8; N]> for ByteBuffer {
    fn from(s: &'static [u8; N]) -> Self {
        ByteBuffer::Owned(Bytes::from_static(s))
    }
}

/// Metadata declared for a source alongside its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMetadata {
    /// Display name, usually the file name without directories
    pub name: String,
    /// Declared size in bytes
    pub declared_size: u64,
    /// Declared MIME type; empty when unknown
    pub mime_type: String,
    pub last_modified: DateTime<Utc>,
}

impl SourceMetadata {
    /// Metadata with the given name and size, no MIME type, modified now.
    pub fn new(name: impl Into<String>, declared_size: u64) -> Self {
        Self {
            name: name.into(),
            declared_size,
            mime_type: String::new(),
            last_modified: Utc::now(),
        }
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        self.mime_type = mime.into();
        self
    }

    pub fn with_last_modified(mut self, ts: DateTime<Utc>) -> Self {
        self.last_modified = ts;
        self
    }
}

/// Guesses a MIME type from the file name, then from content.
///
/// Returns an empty string when neither source gives an answer.
pub fn guess_mime_type(name: &str, data: &[u8]) -> String {
    if let Some(mime) = mime_guess::from_path(name).first() {
        return mime.essence_str().to_string();
    }
    let prefix = &data[..data.len().min(MAX_SNIFF_SIZE)];
    match infer::get(prefix) {
        Some(kind) => kind.mime_type().to_string(),
        None => String::new(),
    }
}

/// Opens `path` and returns its bytes and derived metadata.
///
/// Fails if the file cannot be read or exceeds `limits.max_file_size`.
pub fn load_path<P: AsRef<Path>>(path: P, limits: &IOLimits) -> Result<(ByteBuffer, SourceMetadata)> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let metadata = file.metadata()?;
    let file_size = metadata.len();

    debug!(
        path = %path.display(),
        size = file_size,
        limits.max_file_size = limits.max_file_size,
        "Loading source"
    );

    if file_size > limits.max_file_size {
        warn!(
            path = %path.display(),
            size = file_size,
            limit = limits.max_file_size,
            "File is too large"
        );
        return Err(IoError::FileTooLarge {
            limit: limits.max_file_size,
            found: file_size,
        });
    }

    // memmap cannot map empty files
    let buffer = if file_size == 0 {
        ByteBuffer::Owned(Bytes::new())
    } else {
        // Safety: read-only map of a regular file that we never write through.
        ByteBuffer::Mapped(unsafe { Mmap::map(&file)? })
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let last_modified = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now());
    let mime_type = guess_mime_type(&name, &buffer);

    Ok((
        buffer,
        SourceMetadata {
            name,
            declared_size: file_size,
            mime_type,
            last_modified,
        },
    ))
}
