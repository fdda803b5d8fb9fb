// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Transfer-Request Queue
//!
//! Pending ownership-transfer requests are workflow state, not history:
//! they live in their own JSON file outside the tamper-evident chain and
//! are deleted once fulfilled. Losing this file loses nothing auditable.

use crate::identity::Role;
use landchain_persistence::store;
use landchain_persistence::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// One pending request: who asked for which parcel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub land_id: String,
    pub requester: String,
    pub requester_role: Role,
}

/// Read the queue; an absent file is an empty queue.
pub fn load_requests(path: &Path) -> Result<Vec<TransferRequest>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn save_requests(path: &Path, requests: &[TransferRequest]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(requests)?;
    store::write_atomic(path, &bytes)
}
