//! BLAKE3 digests of bundle definitions

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use blake3::Hasher;

use crate::error::{Result, fs};

/// Hash prefix for BLAKE3 digests
pub const HASH_PREFIX: &str = "blake3:";

/// Digest of an in-memory bundle definition
pub fn digest_bytes(data: &[u8]) -> String {
    format!("{}{}", HASH_PREFIX, blake3::hash(data).to_hex())
}

/// Digest of a file's contents
pub fn digest_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| fs::read_failed(path, &e))?;

    let mut reader = BufReader::new(file);
    let mut hasher = Hasher::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| fs::read_failed(path, &e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(&buffer[..bytes_read]);
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}
