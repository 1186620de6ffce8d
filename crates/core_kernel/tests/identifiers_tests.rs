//! Tests for strongly-typed identifiers

use std::collections::HashSet;
use std::str::FromStr;

use core_kernel::{DemandId, FamilyMemberId, NotificationId, ProfileId};
use uuid::Uuid;

#[test]
fn test_each_id_type_has_distinct_prefix() {
    assert_eq!(ProfileId::prefix(), "USR");
    assert_eq!(FamilyMemberId::prefix(), "FAM");
    assert_eq!(DemandId::prefix(), "DEM");
    assert_eq!(NotificationId::prefix(), "NTF");
}

#[test]
fn test_display_includes_prefix() {
    let id = FamilyMemberId::new();
    assert!(id.to_string().starts_with("FAM-"));
}

#[test]
fn test_parse_with_and_without_prefix() {
    let id = DemandId::new_v7();
    let with_prefix = id.to_string();
    let bare = id.as_uuid().to_string();

    assert_eq!(DemandId::from_str(&with_prefix).unwrap(), id);
    assert_eq!(DemandId::from_str(&bare).unwrap(), id);
}

#[test]
fn test_parse_rejects_garbage() {
    assert!(ProfileId::from_str("not-a-uuid").is_err());
}

#[test]
fn test_v7_ids_are_unique() {
    let ids: HashSet<DemandId> = (0..100).map(|_| DemandId::new_v7()).collect();
    assert_eq!(ids.len(), 100);
}

#[test]
fn test_uuid_round_trip() {
    let uuid = Uuid::new_v4();
    let id = ProfileId::from_uuid(uuid);
    assert_eq!(Uuid::from(id), uuid);
}

#[test]
fn test_serde_is_transparent() {
    let id = DemandId::new();
    let json = serde_json::to_string(&id).unwrap();
    // Serializes as the bare UUID, not the prefixed display form
    assert_eq!(json, format!("\"{}\"", id.as_uuid()));

    let back: DemandId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
