use pretty_assertions::assert_eq;
use serde_json::json;
use studyconnect_core::{
    record::Record,
    store::{Direction, Query, compare_values},
};

fn sessions() -> Vec<Record> {
    vec![
        Record::from_value(
            "a",
            json!({ "groupName": "Calculus", "sessionDate": "2025-04-23T12:00:00Z" }),
        ),
        Record::from_value(
            "b",
            json!({ "groupName": "Physics", "sessionDate": "2025-04-23T09:00:00Z" }),
        ),
        Record::from_value(
            "c",
            json!({ "groupName": "Calculus", "sessionDate": { "seconds": 1745398800 } }),
        ),
        Record::from_value("d", json!({ "groupName": "Calculus" })),
        Record::from_value(
            "e",
            json!({ "groupName": "Calculus", "sessionDate": "2025-04-24T00:00:00Z" }),
        ),
    ]
}

fn ids(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn test_equality_filter() {
    let result = Query::new()
        .where_eq("groupName", "Calculus")
        .apply(sessions());
    assert_eq!(ids(&result), vec!["a", "c", "d", "e"]);
}

#[test]
fn test_half_open_range_filter_on_mixed_timestamp_shapes() {
    let result = Query::new()
        .where_gte("sessionDate", "2025-04-23T00:00:00Z")
        .where_lt("sessionDate", "2025-04-24T00:00:00Z")
        .apply(sessions());

    // "c" is stored as a seconds object (09:00Z); "e" sits exactly on the upper bound.
    assert_eq!(ids(&result), vec!["a", "b", "c"]);
}

#[test]
fn test_order_by_is_stable_and_puts_missing_last() {
    let result = Query::new()
        .order_by("sessionDate", Direction::Ascending)
        .apply(sessions());
    assert_eq!(ids(&result), vec!["b", "c", "a", "e", "d"]);

    let result = Query::new()
        .order_by("sessionDate", Direction::Descending)
        .apply(sessions());
    assert_eq!(ids(&result), vec!["e", "a", "b", "c", "d"]);

    // 1893456000 is 2030-01-01T00:00:00Z, stored as Unix seconds.
    let mixed = vec![
        Record::from_value("string_2025", json!({ "sessionDate": "2025-04-23T10:00:00Z" })),
        Record::from_value("seconds_2030", json!({ "sessionDate": 1893456000 })),
        Record::from_value("object_2024", json!({ "sessionDate": { "_seconds": 1704067200 } })),
    ];
    let result = Query::new()
        .order_by("sessionDate", Direction::Ascending)
        .apply(mixed.clone());
    assert_eq!(ids(&result), vec!["object_2024", "string_2025", "seconds_2030"]);

    let result = Query::new()
        .order_by("sessionDate", Direction::Ascending)
        .limit(1)
        .apply(mixed[..2].to_vec());
    assert_eq!(ids(&result), vec!["string_2025"]);
}

#[test]
fn test_limit_applies_after_ordering() {
    let result = Query::new()
        .where_eq("groupName", "Calculus")
        .order_by("sessionDate", Direction::Ascending)
        .limit(2)
        .apply(sessions());
    assert_eq!(ids(&result), vec!["c", "a"]);
}

#[test]
fn test_missing_field_never_matches() {
    let result = Query::new()
        .where_gt("sessionDate", "2000-01-01T00:00:00Z")
        .apply(sessions());
    assert!(!ids(&result).contains(&"d"));
}

#[test]
fn test_compare_values() {
    use std::cmp::Ordering;

    assert_eq!(compare_values(&json!(1), &json!(1.0)), Some(Ordering::Equal));
    assert_eq!(compare_values(&json!("a"), &json!("b")), Some(Ordering::Less));
    assert_eq!(
        compare_values(&json!(1745402400), &json!("2025-04-23T10:00:00Z")),
        Some(Ordering::Equal)
    );
    assert_eq!(compare_values(&json!("a"), &json!(true)), None);
}
