//! Ledger File Codec
//!
//! The durable representation is a JSON array of block records in index
//! order: `{index, timestamp, data, previous_hash, hash}` per block, hashes
//! as 64 hex chars.
//!
//! # Guarantees
//! - Writes are atomic: tmp file in the same directory, fsync, rename.
//!   A crash leaves either the old ledger or the new one, never a
//!   truncated mix.
//! - Loads re-verify the whole chain before returning it. Hashes are read
//!   as stored, never re-derived from payloads, so any edit made to the
//!   file since the last save is detected.
//! - An absent file is the one case read as "no ledger yet": a fresh
//!   genesis chain. An unparseable file is an error, never "empty".

use crate::error::Result;
use landchain_kernel::block::Block;
use landchain_kernel::chain::Chain;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Write `bytes` to `path` atomically (tmp + fsync + rename).
///
/// Shared with the other JSON stores so every on-disk write in the system
/// goes through the same crash-safe path.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let tmp_path = path.with_extension("tmp");
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// Serialize the chain to `path`, blocks in index order, indented JSON.
pub fn save_chain(chain: &Chain, path: &Path) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(chain.blocks())?;
    write_atomic(path, &bytes)
}

/// Load a chain from `path`, verifying every link and self-hash before
/// returning it.
pub fn load_chain(path: &Path) -> Result<Chain> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Chain::genesis()),
        Err(e) => return Err(e.into()),
    };
    let blocks: Vec<Block> = serde_json::from_slice(&bytes)?;
    let chain = Chain::from_blocks(blocks);
    chain.verify()?;
    Ok(chain)
}
