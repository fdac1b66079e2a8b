use pretty_assertions::assert_eq;
use serde_json::{Map, Value, json};
use studyconnect_core::{
    errors::StudyError,
    store::{Direction, DocumentStore, Query},
};
use studyconnect_db::MemoryStore;

fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("fields must be an object"),
    }
}

#[tokio::test]
async fn test_add_then_fetch_preserves_insertion_order() {
    let store = MemoryStore::new();
    let first = store
        .add_document("groups", fields(json!({ "groupName": "Calculus" })))
        .await
        .unwrap();
    let second = store
        .add_document("groups", fields(json!({ "groupName": "Accounting" })))
        .await
        .unwrap();

    let records = store.fetch_collection("groups", &Query::new()).await.unwrap();
    let ids: Vec<_> = records.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec![first, second]);
}

#[tokio::test]
async fn test_fetch_unknown_collection_is_empty() {
    let store = MemoryStore::new();
    let records = store.fetch_collection("nothing", &Query::new()).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_fetch_applies_query() {
    let store = MemoryStore::from_seed(json!({
        "sessions": [
            { "id": "late", "groupName": "Calculus", "sessionDate": "2025-04-23T15:00:00Z" },
            { "id": "other", "groupName": "Physics", "sessionDate": "2025-04-23T08:00:00Z" },
            { "id": "early", "groupName": "Calculus", "sessionDate": "2025-04-23T09:00:00Z" },
        ]
    }))
    .unwrap();

    let query = Query::new()
        .where_eq("groupName", "Calculus")
        .order_by("sessionDate", Direction::Ascending);
    let records = store.fetch_collection("sessions", &query).await.unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["early", "late"]);
    assert!(records[0].get("id").is_none());
}

#[tokio::test]
async fn test_set_document_replaces_and_update_merges() {
    let store = MemoryStore::new();
    store
        .set_document("users", "u1", fields(json!({ "name": "Menuka", "phone": "1" })))
        .await
        .unwrap();
    store
        .update_document("users", "u1", fields(json!({ "phone": "2", "location": "Colombo" })))
        .await
        .unwrap();

    let user = store.get_document("users", "u1").await.unwrap().unwrap();
    assert_eq!(user.str_field("name"), Some("Menuka"));
    assert_eq!(user.str_field("phone"), Some("2"));
    assert_eq!(user.str_field("location"), Some("Colombo"));

    store
        .set_document("users", "u1", fields(json!({ "name": "Replaced" })))
        .await
        .unwrap();
    let user = store.get_document("users", "u1").await.unwrap().unwrap();
    assert_eq!(user.str_field("phone"), None);
    assert_eq!(store.len("users").await, 1);
}

#[tokio::test]
async fn test_update_missing_document_is_not_found() {
    let store = MemoryStore::new();
    let err = store
        .update_document("users", "ghost", Map::new())
        .await
        .unwrap_err();
    assert!(matches!(err, StudyError::NotFound(_)));
}

#[test]
fn test_seed_rejects_bad_shapes() {
    assert!(MemoryStore::from_seed(json!([])).is_err());
    assert!(MemoryStore::from_seed(json!({ "groups": {} })).is_err());
    assert!(MemoryStore::from_seed(json!({ "groups": [1] })).is_err());
}

#[tokio::test]
async fn test_load_seed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("seed.json");
    std::fs::write(&path, r#"{ "groups": [ { "groupName": "Calculus" } ] }"#).unwrap();

    let store = MemoryStore::load_seed_file(&path).await.unwrap();
    assert_eq!(store.len("groups").await, 1);

    let missing = MemoryStore::load_seed_file(&dir.path().join("missing.json")).await;
    assert!(missing.is_err());
}
