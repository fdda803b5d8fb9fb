//! Integrity Verification
//!
//! Re-derives every chain invariant from raw block contents. Nothing stored
//! is trusted: each self-hash is recomputed from the canonical payload
//! encoding, and each link is checked against the predecessor's hash.
//!
//! # Contract
//! O(N) walk in index order. The first violated block's index is reported;
//! callers wanting a full diagnostic sweep can re-run after repair, but the
//! contract is "at least the first break".

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::block::{self, Block, SENTINEL};
use crate::canonical;
use crate::chain::Chain;
use thiserror::Error;

/// Why a block failed verification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// The chain has no blocks at all; even an empty ledger has genesis.
    #[error("chain has no genesis block")]
    MissingGenesis,
    /// Genesis block's previous hash is not the all-zero sentinel.
    #[error("genesis previous hash is not the sentinel")]
    GenesisPreviousHash,
    /// Stored index does not match the block's position.
    #[error("stored index {found} does not match position {expected}")]
    IndexMismatch { expected: u64, found: u64 },
    /// `previous_hash` does not match the predecessor's hash.
    #[error("previous hash does not match predecessor")]
    BrokenLink,
    /// Recomputed content hash differs from the stored hash.
    #[error("stored hash does not match recomputed content hash")]
    HashMismatch,
    /// The stored payload has no canonical encoding, so its hash cannot be
    /// re-derived.
    #[error("payload is not canonically encodable")]
    UnencodablePayload,
}

/// A failed verification: the first block at which history breaks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("chain broken at block {index}: {kind}")]
pub struct IntegrityViolation {
    pub index: u64,
    pub kind: ViolationKind,
}

/// Walk the whole chain, re-deriving linkage and self-hashes.
///
/// Must pass before a freshly loaded chain is trusted; the persistence
/// codec calls this on every load.
pub fn verify_chain(chain: &Chain) -> Result<(), IntegrityViolation> {
    let blocks = chain.blocks();
    if blocks.is_empty() {
        return Err(IntegrityViolation {
            index: 0,
            kind: ViolationKind::MissingGenesis,
        });
    }

    let mut previous: Option<&Block> = None;
    for (position, block) in blocks.iter().enumerate() {
        let index = position as u64;
        let fail = |kind| Err(IntegrityViolation { index, kind });

        if block.index() != index {
            return fail(ViolationKind::IndexMismatch {
                expected: index,
                found: block.index(),
            });
        }

        match previous {
            None => {
                if block.previous_hash() != SENTINEL {
                    return fail(ViolationKind::GenesisPreviousHash);
                }
            }
            Some(prev) => {
                if block.previous_hash() != prev.hash() {
                    return fail(ViolationKind::BrokenLink);
                }
            }
        }

        let encoded = match canonical::encode_payload(block.data()) {
            Ok(bytes) => bytes,
            Err(_) => return fail(ViolationKind::UnencodablePayload),
        };
        let expected = block::content_hash(
            block.index(),
            block.timestamp(),
            &encoded,
            &block.previous_hash(),
        );
        if expected != block.hash() {
            return fail(ViolationKind::HashMismatch);
        }

        previous = Some(block);
    }

    Ok(())
}
