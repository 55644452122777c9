use hearth_types::EntityId;
use std::collections::HashSet;

#[test]
fn new_is_unique() {
    let ids: HashSet<EntityId> = (0..1_000).map(|_| EntityId::new()).collect();
    assert_eq!(ids.len(), 1_000);
}

#[test]
fn new_is_a_canonical_v4_uuid() {
    let id = EntityId::new();
    let uuid = id.as_uuid().unwrap();
    assert_eq!(uuid.get_version_num(), 4);
    assert_eq!(id.as_str(), uuid.hyphenated().to_string());
    assert_eq!(id.as_str().len(), 36);
}

#[test]
fn restored_ids_need_not_be_uuids() {
    let id = EntityId::from("legacy-42");
    assert_eq!(id.as_str(), "legacy-42");
    assert!(id.as_uuid().is_err());
}

#[test]
fn display_is_the_raw_string() {
    let id: EntityId = "56d43177-cc5f-4d6c-a0c1-e167f8c27337".parse().unwrap();
    assert_eq!(id.to_string(), "56d43177-cc5f-4d6c-a0c1-e167f8c27337");
}

#[test]
fn default_is_unique() {
    assert_ne!(EntityId::default(), EntityId::default());
}

#[test]
fn serializes_transparently() {
    let id = EntityId::from("abc");
    assert_eq!(serde_json::to_string(&id).unwrap(), r#""abc""#);
    let parsed: EntityId = serde_json::from_str(r#""abc""#).unwrap();
    assert_eq!(parsed, id);
}
