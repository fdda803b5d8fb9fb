// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Caller identity.
//!
//! Every operation that records who acted takes the identity as an
//! explicit parameter. The ledger core has no notion of a logged-in
//! session; login and authorization belong to the hosting layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// Coarse role attached to a caller, recorded alongside requests for
/// audit purposes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}
