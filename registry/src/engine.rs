// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Land Registry Engine
//!
//! The collaborator-facing ledger operations. Every mutating call is one
//! transaction over the persisted chain:
//!
//! ```text
//! lock (exclusive)
//! ↓
//! load + verify
//! ↓
//! append amendment
//! ↓
//! save (atomic rename = commit point)
//! ↓
//! unlock (on every exit path)
//! ```
//!
//! # Invariants
//! - No block is ever edited: ownership changes and GST payments append
//!   amendments that copy the latest payload forward.
//! - Failure before the save leaves the persisted history untouched;
//!   there is no partial-completion state visible to callers.
//! - Reads hold the shared lock, so they never observe a half-written
//!   cycle, and run concurrently with each other.

use crate::config::RegistryConfig;
use crate::error::RegistryError;
use crate::identity::Actor;
use crate::record::LandRecord;
use crate::requests::{self, TransferRequest};
use landchain_kernel::block::Block;
use landchain_kernel::payload::{field, Payload};
use landchain_persistence::lock::StoreLock;
use landchain_persistence::store;
use landchain_persistence::PersistenceError;
use std::time::{SystemTime, UNIX_EPOCH};

pub struct LandRegistry {
    config: RegistryConfig,
}

impl LandRegistry {
    pub fn open(config: RegistryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Record an arbitrary fact as a new block, timestamped now.
    pub fn append(&self, data: Payload) -> Result<Block, RegistryError> {
        let _guard = self.exclusive_lock()?;
        let mut chain = store::load_chain(&self.config.ledger_path)?;
        let block = chain.append(data, now())?.clone();
        store::save_chain(&chain, &self.config.ledger_path)?;
        tracing::debug!(index = block.index(), "block appended");
        Ok(block)
    }

    /// Register a new parcel. A `land_id` seen before is not an error:
    /// duplicate ids amend the parcel's history rather than create one.
    pub fn register(&self, record: LandRecord) -> Result<Block, RegistryError> {
        let land_id = record.land_id.clone();
        let block = self.append(record.into_payload())?;
        tracing::info!(%land_id, index = block.index(), "land registered");
        Ok(block)
    }

    /// The most recent recorded state for a parcel.
    pub fn latest_for(&self, land_id: &str) -> Result<Payload, RegistryError> {
        let _guard = self.shared_lock()?;
        let chain = store::load_chain(&self.config.ledger_path)?;
        chain
            .latest_for(land_id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(land_id.to_owned()))
    }

    /// Full audit trail for a parcel, oldest to newest. Empty if the
    /// parcel was never recorded.
    pub fn all_for(&self, land_id: &str) -> Result<Vec<Payload>, RegistryError> {
        let _guard = self.shared_lock()?;
        let chain = store::load_chain(&self.config.ledger_path)?;
        Ok(chain.all_for(land_id).cloned().collect())
    }

    /// Record an ownership change as an amendment: the latest payload is
    /// copied, `owner` replaced, and the copy appended. The prior owner's
    /// record stays in place, auditable forever.
    ///
    /// Any pending transfer requests for the parcel are dropped from the
    /// queue once the transfer lands.
    pub fn approve_transfer(
        &self,
        land_id: &str,
        new_owner: &str,
    ) -> Result<Block, RegistryError> {
        let _guard = self.exclusive_lock()?;
        let mut chain = store::load_chain(&self.config.ledger_path)?;
        let latest = chain
            .latest_for(land_id)
            .ok_or_else(|| RegistryError::NotFound(land_id.to_owned()))?;

        let mut amended = latest.clone();
        amended.set(field::OWNER, new_owner);
        let block = chain.append(amended, now())?.clone();
        store::save_chain(&chain, &self.config.ledger_path)?;

        self.drop_requests_for(land_id)?;
        tracing::info!(%land_id, new_owner, index = block.index(), "ownership transferred");
        Ok(block)
    }

    /// Mark GST paid for a parcel, as an amendment. Paying twice is
    /// refused: the guard keys off the latest recorded state.
    pub fn mark_gst_paid(&self, land_id: &str) -> Result<Block, RegistryError> {
        let _guard = self.exclusive_lock()?;
        let mut chain = store::load_chain(&self.config.ledger_path)?;
        let latest = chain
            .latest_for(land_id)
            .ok_or_else(|| RegistryError::NotFound(land_id.to_owned()))?;
        if latest.get_bool(field::GST_PAID) == Some(true) {
            return Err(RegistryError::AlreadyPaid(land_id.to_owned()));
        }

        let mut amended = latest.clone();
        amended.set(field::GST_PAID, true);
        let block = chain.append(amended, now())?.clone();
        store::save_chain(&chain, &self.config.ledger_path)?;
        tracing::info!(%land_id, index = block.index(), "gst marked paid");
        Ok(block)
    }

    /// Verify the whole persisted history. Loading already re-derives
    /// every hash and link; this is the explicit audit entry point.
    pub fn verify(&self) -> Result<(), RegistryError> {
        let _guard = self.shared_lock()?;
        match store::load_chain(&self.config.ledger_path) {
            Ok(chain) => {
                tracing::debug!(blocks = chain.len(), "ledger verified");
                Ok(())
            }
            Err(e) => {
                if let PersistenceError::Integrity(violation) = &e {
                    tracing::warn!(index = violation.index, %violation, "ledger integrity check failed");
                }
                Err(e.into())
            }
        }
    }

    /// File a transfer request. Requests are ephemeral workflow state;
    /// nothing is appended to the ledger until an approval.
    pub fn request_transfer(&self, land_id: &str, requester: &Actor) -> Result<(), RegistryError> {
        let _guard = self.exclusive_lock()?;
        let mut pending = requests::load_requests(&self.config.requests_path)?;
        pending.push(TransferRequest {
            land_id: land_id.to_owned(),
            requester: requester.name.clone(),
            requester_role: requester.role,
        });
        requests::save_requests(&self.config.requests_path, &pending)?;
        tracing::info!(%land_id, requester = %requester.name, "transfer requested");
        Ok(())
    }

    /// Requests visible to `owner`: those whose parcel the ledger
    /// currently records as owned by `owner`. Ownership is decided by the
    /// `owner` field of the latest record, nothing else.
    pub fn pending_requests_for(
        &self,
        owner: &str,
    ) -> Result<Vec<TransferRequest>, RegistryError> {
        let _guard = self.shared_lock()?;
        let chain = store::load_chain(&self.config.ledger_path)?;
        let pending = requests::load_requests(&self.config.requests_path)?;
        Ok(pending
            .into_iter()
            .filter(|request| {
                chain.latest_for(&request.land_id).and_then(Payload::owner) == Some(owner)
            })
            .collect())
    }

    fn drop_requests_for(&self, land_id: &str) -> Result<(), RegistryError> {
        let mut pending = requests::load_requests(&self.config.requests_path)?;
        let before = pending.len();
        pending.retain(|request| request.land_id != land_id);
        if pending.len() != before {
            requests::save_requests(&self.config.requests_path, &pending)?;
        }
        Ok(())
    }

    fn exclusive_lock(&self) -> Result<StoreLock, RegistryError> {
        StoreLock::exclusive(&self.config.lock_path())
            .map_err(PersistenceError::from)
            .map_err(RegistryError::from)
    }

    fn shared_lock(&self) -> Result<StoreLock, RegistryError> {
        StoreLock::shared(&self.config.lock_path())
            .map_err(PersistenceError::from)
            .map_err(RegistryError::from)
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
