// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Canonical Payload Encoding
//!
//! Deterministic byte representation of a payload: the input to every block
//! hash. Structurally equal payloads encode byte-identically regardless of
//! how, or in what order, they were built.
//!
//! # Guarantee
//! Same payload → same bytes (x86 = ARM = WASM). Neither map iteration
//! order nor float formatting leaks into the hash.
//!
//! # Layout
//! ```text
//! field_count (u32 LE)
//! For each field (keys in lexicographic order):
//!   key_len (u32 LE)
//!   key bytes (UTF-8)
//!   type tag (u8)
//!   value bytes (tag-specific, LE)
//! ```
//!
//! Floats are encoded as their IEEE-754 bit pattern, with `-0.0` normalized
//! to `0.0` so the two equal values cannot hash apart. Non-finite floats
//! have no canonical form and fail with [`EncodingError`].

use crate::error::EncodingError;
use crate::payload::{FieldValue, Payload};

const TAG_NULL: u8 = 0;
const TAG_BOOL: u8 = 1;
const TAG_INT: u8 = 2;
const TAG_FLOAT: u8 = 3;
const TAG_TEXT: u8 = 4;

/// Encode a payload into its canonical byte sequence.
pub fn encode_payload(payload: &Payload) -> Result<Vec<u8>, EncodingError> {
    let mut out = Vec::with_capacity(16 + payload.len() * 24);
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    for (key, value) in payload.iter() {
        out.extend_from_slice(&(key.len() as u32).to_le_bytes());
        out.extend_from_slice(key.as_bytes());
        encode_value(key, value, &mut out)?;
    }
    Ok(out)
}

fn encode_value(key: &str, value: &FieldValue, out: &mut Vec<u8>) -> Result<(), EncodingError> {
    match value {
        FieldValue::Null => out.push(TAG_NULL),
        FieldValue::Bool(b) => {
            out.push(TAG_BOOL);
            out.push(*b as u8);
        }
        FieldValue::Int(i) => {
            out.push(TAG_INT);
            out.extend_from_slice(&i.to_le_bytes());
        }
        FieldValue::Float(f) => {
            if !f.is_finite() {
                return Err(EncodingError::NonFiniteNumber {
                    field: key.to_owned(),
                });
            }
            let bits = if *f == 0.0 { 0u64 } else { f.to_bits() };
            out.push(TAG_FLOAT);
            out.extend_from_slice(&bits.to_le_bytes());
        }
        FieldValue::Text(s) => {
            out.push(TAG_TEXT);
            out.extend_from_slice(&(s.len() as u32).to_le_bytes());
            out.extend_from_slice(s.as_bytes());
        }
    }
    Ok(())
}
