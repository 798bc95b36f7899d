use sha2::{Digest, Sha256};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::Path;

use crate::error::Result;

/// Outcome of checking a file against a stored hash record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    /// No hash record was supplied.
    Skipped,
    Passed,
    Failed { expected: String, actual: String },
}

impl Verification {
    pub fn is_failure(&self) -> bool {
        matches!(self, Verification::Failed { .. })
    }
}

pub fn hex_digest(hasher: Sha256) -> String {
    hex::encode(hasher.finalize())
}

/// Lowercase hex SHA-256 of everything `r` yields.
pub fn sha256_reader<R: Read>(mut r: R) -> io::Result<String> {
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; 1 << 16];
    loop {
        let n = r.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex_digest(hasher))
}

pub fn sha256_file(path: &Path) -> Result<String> {
    Ok(sha256_reader(File::open(path)?)?)
}

pub fn write_hash_record(path: &Path, digest: &str) -> Result<()> {
    fs::write(path, digest)?;
    Ok(())
}

/// Record content is taken verbatim; no trimming.
pub fn read_hash_record(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

pub fn verify_file(path: &Path, hashfile: &Path) -> Result<Verification> {
    let expected = read_hash_record(hashfile)?;
    let actual = sha256_file(path)?;
    if actual == expected {
        Ok(Verification::Passed)
    } else {
        Ok(Verification::Failed { expected, actual })
    }
}
