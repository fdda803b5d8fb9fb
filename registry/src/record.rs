// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Typed registration records.

use landchain_kernel::payload::{field, Payload};
use serde::{Deserialize, Serialize};

/// The registered facts for one parcel, as collected by the hosting layer.
///
/// This is the typed edge over the otherwise-opaque payload: registration
/// flattens it into payload fields, and later amendments copy those fields
/// forward block by block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandRecord {
    pub land_id: String,
    pub location: String,
    /// Square feet.
    pub area: f64,
    pub latitude: f64,
    pub longitude: f64,
    pub owner: String,
    pub registered_by: String,
    #[serde(default)]
    pub gst_paid: bool,
}

impl LandRecord {
    pub fn into_payload(self) -> Payload {
        let mut payload = Payload::new();
        payload.set(field::LAND_ID, self.land_id);
        payload.set(field::LOCATION, self.location);
        payload.set(field::AREA, self.area);
        payload.set(field::LATITUDE, self.latitude);
        payload.set(field::LONGITUDE, self.longitude);
        payload.set(field::OWNER, self.owner);
        payload.set(field::REGISTERED_BY, self.registered_by);
        payload.set(field::GST_PAID, self.gst_paid);
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_flattens_to_payload() {
        let record = LandRecord {
            land_id: "A1".into(),
            location: "Pune".into(),
            area: 1200.0,
            latitude: 18.5204,
            longitude: 73.8567,
            owner: "alice".into(),
            registered_by: "registrar1".into(),
            gst_paid: false,
        };

        let payload = record.into_payload();
        assert_eq!(payload.land_id(), Some("A1"));
        assert_eq!(payload.owner(), Some("alice"));
        assert_eq!(payload.get_str(field::REGISTERED_BY), Some("registrar1"));
        assert_eq!(payload.get_bool(field::GST_PAID), Some(false));
        assert_eq!(payload.len(), 8);
    }
}
