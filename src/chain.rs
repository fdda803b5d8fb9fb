// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The append-only chain.
//!
//! # Invariants
//! - `blocks[0]` is the genesis block (sentinel previous hash)
//! - `blocks[i].index == i`, no gaps, no reordering
//! - `blocks[i].previous_hash == blocks[i-1].hash`
//! - timestamps never decrease along the chain
//! - blocks are never edited or removed; a state change is a new block
//!   (an amendment) for the same `land_id`
//!
//! Current ownership is a derived view over history: the newest block
//! mentioning a parcel wins, and every older block stays in place as the
//! audit trail.

use crate::block::{Block, SENTINEL};
use crate::error::EncodingError;
use crate::payload::Payload;
use crate::verify::{self, IntegrityViolation};

#[derive(Debug, Clone, PartialEq)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// Timestamp of every genesis block. Pinned so two independently
    /// created empty ledgers are structurally identical.
    pub const GENESIS_TIMESTAMP: u64 = 0;

    /// A single-block chain rooted at the fixed genesis block.
    pub fn genesis() -> Self {
        let genesis = Block::seal(0, Self::GENESIS_TIMESTAMP, Payload::new(), SENTINEL)
            .expect("the empty payload always encodes");
        Self {
            blocks: vec![genesis],
        }
    }

    /// Rebuild a chain from stored blocks, hashes as read.
    ///
    /// The result is unverified. Run [`Chain::verify`] before trusting it;
    /// the persistence codec does so on every load.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn tip(&self) -> Option<&Block> {
        self.blocks.last()
    }

    /// Append a new fact, linked to the current tip.
    ///
    /// The new block's index and previous hash come from the tip; a
    /// timestamp behind the tip's is clamped up to it so the chain-wide
    /// monotonicity invariant holds even when the host clock steps back.
    pub fn append(&mut self, data: Payload, timestamp: u64) -> Result<&Block, EncodingError> {
        let (index, timestamp, previous_hash) = match self.tip() {
            Some(tip) => (tip.index() + 1, timestamp.max(tip.timestamp()), tip.hash()),
            None => (0, timestamp, SENTINEL),
        };
        let block = Block::seal(index, timestamp, data, previous_hash)?;
        self.blocks.push(block);
        Ok(&self.blocks[index as usize])
    }

    /// The most recent recorded state for a parcel, scanning tail-first.
    pub fn latest_for(&self, land_id: &str) -> Option<&Payload> {
        self.blocks
            .iter()
            .rev()
            .map(Block::data)
            .find(|data| data.land_id() == Some(land_id))
    }

    /// Full audit trail for one parcel, oldest to newest.
    ///
    /// The iterator borrows the chain and re-scans on every call; there is
    /// no cursor state to invalidate.
    pub fn all_for<'a>(&'a self, land_id: &'a str) -> impl Iterator<Item = &'a Payload> + 'a {
        self.blocks
            .iter()
            .map(Block::data)
            .filter(move |data| data.land_id() == Some(land_id))
    }

    /// Re-derive every invariant; see [`verify::verify_chain`].
    pub fn verify(&self) -> Result<(), IntegrityViolation> {
        verify::verify_chain(self)
    }
}
