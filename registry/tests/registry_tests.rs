// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! End-to-end registry flows over a real on-disk ledger.

use landchain_kernel::payload::field;
use landchain_persistence::store;
use landchain_registry::config::RegistryConfig;
use landchain_registry::engine::LandRegistry;
use landchain_registry::error::RegistryError;
use landchain_registry::identity::{Actor, Role};
use landchain_registry::record::LandRecord;
use tempfile::tempdir;

fn sample_record(land_id: &str, owner: &str) -> LandRecord {
    LandRecord {
        land_id: land_id.into(),
        location: "Pune".into(),
        area: 1200.0,
        latitude: 18.5204,
        longitude: 73.8567,
        owner: owner.into(),
        registered_by: "registrar1".into(),
        gst_paid: false,
    }
}

#[test]
fn test_register_then_query() {
    let dir = tempdir().unwrap();
    let config = RegistryConfig::in_dir(dir.path());
    let registry = LandRegistry::open(config.clone());

    registry.register(sample_record("A1", "alice")).unwrap();

    // Genesis + A1.
    let chain = store::load_chain(&config.ledger_path).unwrap();
    assert_eq!(chain.len(), 2);

    let latest = registry.latest_for("A1").unwrap();
    assert_eq!(latest.owner(), Some("alice"));
    assert_eq!(latest.get_bool(field::GST_PAID), Some(false));
    registry.verify().unwrap();
}

#[test]
fn test_transfer_is_an_amendment_not_a_mutation() {
    let dir = tempdir().unwrap();
    let config = RegistryConfig::in_dir(dir.path());
    let registry = LandRegistry::open(config.clone());

    registry.register(sample_record("A1", "alice")).unwrap();
    let before = registry.all_for("A1").unwrap();

    registry.approve_transfer("A1", "bob").unwrap();

    let chain = store::load_chain(&config.ledger_path).unwrap();
    assert_eq!(chain.len(), 3);
    assert_eq!(registry.latest_for("A1").unwrap().owner(), Some("bob"));

    // One more entry, prior entries untouched.
    let after = registry.all_for("A1").unwrap();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[..before.len()], before[..]);
    let owners: Vec<_> = after.iter().filter_map(|p| p.owner()).collect();
    assert_eq!(owners, vec!["alice", "bob"]);

    registry.verify().unwrap();
}

#[test]
fn test_gst_payment_is_idempotency_guarded() {
    let dir = tempdir().unwrap();
    let registry = LandRegistry::open(RegistryConfig::in_dir(dir.path()));

    registry.register(sample_record("A1", "alice")).unwrap();
    let before = registry.all_for("A1").unwrap().len();

    let block = registry.mark_gst_paid("A1").unwrap();
    assert_eq!(block.data().get_bool(field::GST_PAID), Some(true));

    match registry.mark_gst_paid("A1") {
        Err(RegistryError::AlreadyPaid(land_id)) => assert_eq!(land_id, "A1"),
        other => panic!("expected AlreadyPaid, got {other:?}"),
    }

    // Exactly one new block for the one successful payment.
    assert_eq!(registry.all_for("A1").unwrap().len(), before + 1);
}

#[test]
fn test_unknown_parcels_are_not_found() {
    let dir = tempdir().unwrap();
    let registry = LandRegistry::open(RegistryConfig::in_dir(dir.path()));

    assert!(matches!(
        registry.latest_for("Z9"),
        Err(RegistryError::NotFound(_))
    ));
    assert!(matches!(
        registry.approve_transfer("Z9", "bob"),
        Err(RegistryError::NotFound(_))
    ));
    assert!(matches!(
        registry.mark_gst_paid("Z9"),
        Err(RegistryError::NotFound(_))
    ));
    assert_eq!(registry.all_for("Z9").unwrap().len(), 0);

    // An absent ledger is a valid (empty) ledger.
    registry.verify().unwrap();
}

#[test]
fn test_duplicate_registration_amends() {
    let dir = tempdir().unwrap();
    let registry = LandRegistry::open(RegistryConfig::in_dir(dir.path()));

    registry.register(sample_record("A1", "alice")).unwrap();
    registry.register(sample_record("A1", "carol")).unwrap();

    let trail = registry.all_for("A1").unwrap();
    assert_eq!(trail.len(), 2);
    assert_eq!(registry.latest_for("A1").unwrap().owner(), Some("carol"));
}

#[test]
fn test_transfer_request_queue_flow() {
    let dir = tempdir().unwrap();
    let registry = LandRegistry::open(RegistryConfig::in_dir(dir.path()));

    registry.register(sample_record("A1", "alice")).unwrap();
    registry.register(sample_record("B2", "carol")).unwrap();

    let bob = Actor::new("bob", Role::User);
    registry.request_transfer("A1", &bob).unwrap();

    // Visible to the parcel's current owner, decided by the ledger's
    // `owner` field. Not to the requester, and not to anyone else.
    let pending = registry.pending_requests_for("alice").unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].land_id, "A1");
    assert_eq!(pending[0].requester, "bob");
    assert!(registry.pending_requests_for("bob").unwrap().is_empty());
    assert!(registry.pending_requests_for("carol").unwrap().is_empty());

    // Approval appends the amendment and clears the fulfilled request.
    registry.approve_transfer("A1", "bob").unwrap();
    assert!(registry.pending_requests_for("alice").unwrap().is_empty());
    assert!(registry.pending_requests_for("bob").unwrap().is_empty());
}

#[test]
fn test_request_for_unregistered_parcel_is_pending_nowhere() {
    let dir = tempdir().unwrap();
    let registry = LandRegistry::open(RegistryConfig::in_dir(dir.path()));

    let bob = Actor::new("bob", Role::User);
    registry.request_transfer("GHOST", &bob).unwrap();

    assert!(registry.pending_requests_for("alice").unwrap().is_empty());
    assert!(registry.pending_requests_for("bob").unwrap().is_empty());
}

#[test]
fn test_verify_reports_tampered_block_index() {
    let dir = tempdir().unwrap();
    let config = RegistryConfig::in_dir(dir.path());
    let registry = LandRegistry::open(config.clone());

    registry.register(sample_record("A1", "alice")).unwrap();
    registry.approve_transfer("A1", "bob").unwrap();

    // Rewrite history behind the registry's back.
    let raw = std::fs::read(&config.ledger_path).unwrap();
    let mut value: serde_json::Value = serde_json::from_slice(&raw).unwrap();
    value[1]["data"]["owner"] = serde_json::json!("mallory");
    std::fs::write(&config.ledger_path, serde_json::to_vec_pretty(&value).unwrap()).unwrap();

    let err = registry.verify().unwrap_err();
    assert_eq!(err.broken_at(), Some(1));

    // Every operation that loads the chain refuses it, not just verify().
    assert!(registry.latest_for("A1").is_err());
    assert!(registry.mark_gst_paid("A1").is_err());
}

#[test]
fn test_registry_state_survives_reopen() {
    let dir = tempdir().unwrap();
    let config = RegistryConfig::in_dir(dir.path());

    {
        let registry = LandRegistry::open(config.clone());
        registry.register(sample_record("A1", "alice")).unwrap();
        registry.mark_gst_paid("A1").unwrap();
    }

    let reopened = LandRegistry::open(config);
    let latest = reopened.latest_for("A1").unwrap();
    assert_eq!(latest.owner(), Some("alice"));
    assert_eq!(latest.get_bool(field::GST_PAID), Some(true));
    reopened.verify().unwrap();
}
