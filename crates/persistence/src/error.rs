use thiserror::Error;
use std::io;

use landchain_kernel::verify::IntegrityViolation;

#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The file exists but is not a well-formed ledger. Never conflated
    /// with "no ledger yet"; the caller decides what corruption means.
    #[error("ledger file is not well-formed: {0}")]
    Decode(#[from] serde_json::Error),
    /// Stored history fails verification; carries the first broken index.
    #[error(transparent)]
    Integrity(#[from] IntegrityViolation),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
