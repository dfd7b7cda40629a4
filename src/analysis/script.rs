//! Text capture for script sources.

use encoding_rs::UTF_8;

/// Decodes `data` as UTF-8 and keeps at most `limit` characters.
///
/// A leading BOM is dropped and malformed sequences become U+FFFD, the same
/// way a WHATWG `TextDecoder` behaves. Only a bounded prefix of the buffer is
/// decoded: every character consumes at most four bytes, plus three for the
/// BOM, so `limit * 4 + 3` bytes always determine the first `limit`
/// characters.
pub fn decode_text_prefix(data: &[u8], limit: usize) -> String {
    let window = limit.saturating_mul(4).saturating_add(3).min(data.len());
    let (text, _had_errors) = UTF_8.decode_with_bom_removal(&data[..window]);
    match text.char_indices().nth(limit) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.into_owned(),
    }
}
