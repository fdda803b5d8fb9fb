// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! landchain-kernel: a deterministic, hash-linked, append-only ledger core.
//!
//! Everything in this crate is a pure function of its inputs: no clocks and
//! no file IO. Hosts supply timestamps and durability; the kernel supplies
//! the tamper-evidence guarantee.

pub mod block;
pub mod canonical;
pub mod chain;
pub mod error;
pub mod payload;
pub mod verify;
