// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use landchain_kernel::error::EncodingError;
use landchain_persistence::PersistenceError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RegistryError {
    /// No block in the ledger mentions this parcel. Recoverable.
    #[error("no record found for land id `{0}`")]
    NotFound(String),
    /// The latest record already shows GST as paid. Recoverable.
    #[error("gst already paid for land id `{0}`")]
    AlreadyPaid(String),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl RegistryError {
    /// Index of the first broken block, when this is an integrity failure.
    pub fn broken_at(&self) -> Option<u64> {
        match self {
            RegistryError::Persistence(PersistenceError::Integrity(violation)) => {
                Some(violation.index)
            }
            _ => None,
        }
    }
}
