//! Cryptographic digests over analyzed buffers.

use sha2::{Digest, Sha256};
use std::io::{self, Read};

/// Chunk size used when hashing from a reader.
const READ_CHUNK: usize = 64 * 1024;

/// Computes the SHA-256 digest of the given data and returns it as a
/// lowercase hex string (always 64 characters).
pub fn sha256_digest(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Computes the SHA-256 digest of everything readable from `reader`.
///
/// The source is consumed in fixed-size chunks so it never has to be held
/// in memory as a whole.
pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut chunk = vec![0u8; READ_CHUNK];
    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&chunk[..n]);
    }
    Ok(hex::encode(hasher.finalize()))
}
