// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Ledger payloads.
//!
//! A payload is the flat field → value record a block carries: the state of
//! one land parcel at one point in history. The ledger treats it as opaque
//! beyond two requirements: every value must be canonically encodable, and
//! `land_id` is the key the query operations match on.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known payload field names, shared across the system.
pub mod field {
    pub const LAND_ID: &str = "land_id";
    pub const LOCATION: &str = "location";
    pub const AREA: &str = "area";
    pub const LATITUDE: &str = "latitude";
    pub const LONGITUDE: &str = "longitude";
    pub const OWNER: &str = "owner";
    pub const REGISTERED_BY: &str = "registered_by";
    pub const GST_PAID: &str = "gst_paid";
}

/// One scalar payload value.
///
/// This is the closed universe of canonically-encodable values, mapping 1:1
/// onto the JSON scalars of the persisted file. Nested arrays and objects
/// have no canonical encoding and are rejected at the serde boundary.
///
/// Variant order matters for deserialization: integers must be tried before
/// floats so `12` decodes as [`FieldValue::Int`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::Int(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Float(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

/// A block's payload: field names mapped to scalar values.
///
/// Keys are held in lexicographic order (`BTreeMap`), which is exactly the
/// iteration order the canonical encoder requires.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(BTreeMap<String, FieldValue>);

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Insert or replace a field.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(FieldValue::as_bool)
    }

    /// The parcel identifier this payload describes, if any.
    pub fn land_id(&self) -> Option<&str> {
        self.get_str(field::LAND_ID)
    }

    /// The recorded owner, if any.
    pub fn owner(&self) -> Option<&str> {
        self.get_str(field::OWNER)
    }

    /// Fields in lexicographic key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }
}

impl FromIterator<(String, FieldValue)> for Payload {
    fn from_iter<I: IntoIterator<Item = (String, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
