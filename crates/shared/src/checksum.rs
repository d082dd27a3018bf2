//! SHA-256 checksums over file contents.

use crate::errors::ErrorEnvelope;
use crate::result::{Result, ResultExt};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Read buffer size used when hashing files.
pub const CHECKSUM_CHUNK_SIZE: usize = 4096;

/// Compute the lowercase hex SHA-256 digest of a byte slice.
#[must_use]
pub fn sha256_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Compute the lowercase hex SHA-256 digest of everything `reader` yields.
pub fn sha256_reader<R: Read>(mut reader: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; CHECKSUM_CHUNK_SIZE];
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(error) if error.kind() == io::ErrorKind::Interrupted => continue,
            Err(error) => return Err(error),
        };
        hasher.update(buffer.get(..read).unwrap_or_default());
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Compute the lowercase hex SHA-256 digest of a file, streaming it in chunks.
pub fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path).with_path(path)?;
    sha256_reader(file)
        .map_err(ErrorEnvelope::from)
        .with_path(path)
}
