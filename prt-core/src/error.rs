use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrtError {
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("chunk size {chunk_size} is larger than the file ({file_size} bytes)")]
    ChunkTooLarge { chunk_size: u64, file_size: u64 },

    #[error("at least 1 byte required per part ({parts} parts for {file_size} bytes)")]
    SegmentTooSmall { parts: u64, file_size: u64 },

    #[error("no part files for '{base}' in {}", dir.display())]
    PartsNotFound { base: String, dir: PathBuf },

    #[error("malformed part file name: {0}")]
    MalformedPartName(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, PrtError>;
