// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Hash-addressed ledger blocks.
//!
//! A block is one immutable entry of history. Its fields are write-once:
//! they are populated by [`Block::seal`] (which derives the hash from the
//! canonical payload encoding) or reconstructed field-for-field by the
//! persistence codec, and only read thereafter. A state change is never an
//! edit; it is a new block.

use crate::canonical;
use crate::error::EncodingError;
use crate::payload::Payload;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// 32-byte BLAKE3 digest, rendered as 64 lowercase hex chars on disk.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockHash([u8; 32]);

/// `previous_hash` of the genesis block: the all-zero digest.
pub const SENTINEL: BlockHash = BlockHash([0u8; 32]);

impl BlockHash {
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex::decode(s).ok()?;
        let bytes: [u8; 32] = bytes.try_into().ok()?;
        Some(Self(bytes))
    }
}

impl fmt::Display for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for BlockHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BlockHash({})", self.to_hex())
    }
}

impl Serialize for BlockHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for BlockHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = BlockHash;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 64-character hex digest")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<BlockHash, E> {
                BlockHash::from_hex(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

/// One immutable entry in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    index: u64,
    timestamp: u64,
    data: Payload,
    previous_hash: BlockHash,
    hash: BlockHash,
}

impl Block {
    /// Build a fully-populated, read-only block, deriving its hash from
    /// `(index, timestamp, canonical payload, previous_hash)`.
    ///
    /// A negative index or a null previous hash is unrepresentable here;
    /// the only failure is a payload with no canonical encoding.
    pub fn seal(
        index: u64,
        timestamp: u64,
        data: Payload,
        previous_hash: BlockHash,
    ) -> Result<Self, EncodingError> {
        let encoded = canonical::encode_payload(&data)?;
        let hash = content_hash(index, timestamp, &encoded, &previous_hash);
        Ok(Self {
            index,
            timestamp,
            data,
            previous_hash,
            hash,
        })
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    /// Creation time, epoch seconds.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn data(&self) -> &Payload {
        &self.data
    }

    pub fn previous_hash(&self) -> BlockHash {
        self.previous_hash
    }

    pub fn hash(&self) -> BlockHash {
        self.hash
    }
}

/// The block digest: BLAKE3 over the four content fields, each
/// length-delimited or fixed-width so field boundaries are unambiguous.
pub(crate) fn content_hash(
    index: u64,
    timestamp: u64,
    encoded_payload: &[u8],
    previous_hash: &BlockHash,
) -> BlockHash {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&index.to_le_bytes());
    hasher.update(&timestamp.to_le_bytes());
    hasher.update(&(encoded_payload.len() as u64).to_le_bytes());
    hasher.update(encoded_payload);
    hasher.update(previous_hash.as_bytes());
    BlockHash(*hasher.finalize().as_bytes())
}
