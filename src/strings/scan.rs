//! Printable ASCII run scanner.

/// Lowest printable byte (space).
pub const PRINTABLE_MIN: u8 = 0x20;
/// Highest printable byte (tilde).
pub const PRINTABLE_MAX: u8 = 0x7E;

/// Whether `b` belongs to a printable run.
///
/// Tab, newline, DEL and every byte above 0x7E end a run.
#[inline]
pub fn is_printable(b: u8) -> bool {
    (PRINTABLE_MIN..=PRINTABLE_MAX).contains(&b)
}

/// One maximal printable run found in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintableRun<'a> {
    /// Byte offset of the first character in the scanned buffer
    pub offset: usize,
    bytes: &'a [u8],
}

impl<'a> PrintableRun<'a> {
    /// The run as text. Printable bytes are ASCII, so this never loses data.
    pub fn as_str(&self) -> &'a str {
        std::str::from_utf8(self.bytes).unwrap_or_default()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Offset one past the last character.
    pub fn end(&self) -> usize {
        self.offset + self.bytes.len()
    }
}

/// Lazy, single-pass iterator over printable runs of at least `min_length`
/// bytes, in buffer order.
///
/// Runs shorter than the minimum are dropped without being yielded. The
/// iterator borrows the buffer and holds no other resources.
#[derive(Debug, Clone)]
pub struct PrintableRuns<'a> {
    data: &'a [u8],
    pos: usize,
    min_length: usize,
}

impl<'a> PrintableRuns<'a> {
    pub fn new(data: &'a [u8], min_length: usize) -> Self {
        Self {
            data,
            pos: 0,
            min_length: min_length.max(1),
        }
    }
}

impl<'a> Iterator for PrintableRuns<'a> {
    type Item = PrintableRun<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let data = self.data;
        while self.pos < data.len() {
            // Skip the non-printable gap
            let start = match data[self.pos..].iter().position(|&b| is_printable(b)) {
                Some(rel) => self.pos + rel,
                None => {
                    self.pos = data.len();
                    return None;
                }
            };
            let end = data[start..]
                .iter()
                .position(|&b| !is_printable(b))
                .map_or(data.len(), |rel| start + rel);
            self.pos = end;
            if end - start >= self.min_length {
                return Some(PrintableRun {
                    offset: start,
                    bytes: &data[start..end],
                });
            }
        }
        None
    }
}

impl std::iter::FusedIterator for PrintableRuns<'_> {}

/// Collects every qualifying run as an owned string.
pub fn extract_strings(data: &[u8], min_length: usize) -> Vec<String> {
    PrintableRuns::new(data, min_length)
        .map(|run| run.as_str().to_string())
        .collect()
}
