use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use pretty_assertions::assert_eq;
use serde_json::json;
use studyconnect_client::{
    screens::{FindScreen, GroupSessionsScreen, HomeScreen, NotificationsScreen},
    state::FetchState,
};
use studyconnect_core::{
    errors::StudyError,
    models::user::Coordinate,
    record::{Record, timestamp_value},
    store::DocumentStore,
};
use studyconnect_db::{
    MemoryStore,
    mock::stores::{MockDocumentStore, MockGeocoder},
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 23, 9, 0, 0).unwrap()
}

fn at(day: u32, hour: u32, minute: u32) -> serde_json::Value {
    timestamp_value(Utc.with_ymd_and_hms(2025, 4, day, hour, minute, 0).unwrap())
}

fn seeded_store() -> Arc<MemoryStore> {
    let store = MemoryStore::from_seed(json!({
        "groups": [
            { "id": "g1", "groupName": "Calculus", "groupDescription": "Math", "selectedColor": "#3498DB", "memberCount": 4 },
            { "id": "g2", "groupName": "Organic Chemistry" },
            { "id": "g3", "groupDescription": "No name yet" }
        ],
        "sessions": [
            { "id": "s1", "sessionName": "Limits", "groupName": "Calculus", "sessionDate": at(23, 14, 0) },
            { "id": "s2", "sessionName": "Midnight", "groupName": "Calculus", "sessionDate": at(23, 0, 0) },
            { "id": "s3", "sessionName": "Tomorrow", "groupName": "Calculus", "sessionDate": at(24, 0, 0) },
            { "id": "s4", "sessionName": "Alkanes", "groupName": "Organic Chemistry",
              "sessionDate": { "seconds": 1745406000, "nanoseconds": 0 } },
            { "id": "s5", "sessionName": "Broken", "groupName": "Calculus", "sessionDate": "not a date" }
        ],
        "users": [
            { "id": "me", "name": "Me", "latitude": 6.85, "longitude": 79.95 },
            { "id": "u1", "name": "Nimal", "location": "Nugegoda" },
            { "id": "u2", "name": "Kamal", "latitude": 6.86, "longitude": 79.96 },
            { "id": "u3", "name": "Hidden", "latitude": 6.87, "longitude": 79.97, "locationVisible": false }
        ]
    }))
    .unwrap();
    Arc::new(store)
}

#[tokio::test]
async fn test_home_screen_loads_groups_and_sessions() {
    let mut home = HomeScreen::new(seeded_store(), Tz::UTC);
    assert_eq!(home.groups, FetchState::Idle);

    home.activate_at(now()).await;

    let groups = home.groups.loaded().unwrap();
    let names: Vec<_> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["Calculus", "Organic Chemistry", "Unnamed"]);
    assert_eq!(groups[0].member_count_display, "4 members");
    assert_eq!(groups[1].description, "No Description");

    // s4 is 2025-04-23T11:00Z.
    let sessions = home.sessions.loaded().unwrap();
    assert_eq!(sessions.today_count, 3);
    assert_eq!(sessions.next_session.as_ref().unwrap().id, "s4");
    assert_eq!(sessions.skipped, 1);
}

#[tokio::test]
async fn test_home_screen_search_groups() {
    let mut home = HomeScreen::new(seeded_store(), Tz::UTC);
    assert!(home.search_groups("calc").is_empty());

    home.activate_at(now()).await;

    let found: Vec<_> = home.search_groups("CHEM").iter().map(|g| g.id.clone()).collect();
    assert_eq!(found, vec!["g2"]);
    assert_eq!(home.search_groups("  ").len(), 3);
}

#[tokio::test]
async fn test_home_screen_failures_are_independent() {
    let mut store = MockDocumentStore::new();
    store
        .expect_fetch_collection()
        .times(2)
        .returning(|collection, _| {
            if collection == "groups" {
                Err(StudyError::Store(eyre::eyre!("groups offline")))
            } else {
                Ok(vec![Record::from_value(
                    "s1",
                    json!({ "sessionName": "Limits", "sessionDate": "2025-04-23T15:00:00Z" }),
                )])
            }
        });

    let mut home = HomeScreen::new(Arc::new(store), Tz::UTC);
    home.activate_at(now()).await;

    assert_eq!(home.groups.error(), Some("Store error: groups offline"));
    let sessions = home.sessions.loaded().unwrap();
    assert_eq!(sessions.today_count, 1);
    assert_eq!(sessions.next_session.as_ref().unwrap().session_name, "Limits");
}

#[tokio::test]
async fn test_home_screen_with_no_data_is_loaded_empty() {
    let mut home = HomeScreen::new(Arc::new(MemoryStore::new()), Tz::UTC);
    home.activate_at(now()).await;

    assert_eq!(home.groups, FetchState::Loaded(Vec::new()));
    let sessions = home.sessions.loaded().unwrap();
    assert_eq!(sessions.today_count, 0);
    assert_eq!(sessions.next_session, None);
}

#[tokio::test]
async fn test_notifications_screen_uses_half_open_day() {
    let mut screen = NotificationsScreen::new(seeded_store(), Tz::UTC);
    screen.activate_at(now()).await;

    let list = screen.sessions.loaded().unwrap();
    let ids: Vec<_> = list.sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s2", "s4", "s1"]);
}

#[test]
fn test_notifications_query_bounds() {
    let screen = NotificationsScreen::new(Arc::new(MemoryStore::new()), Tz::UTC);
    let query = screen.today_query(now());

    let inside = Record::from_value("a", json!({ "sessionDate": "2025-04-23T00:00:00Z" }));
    let last_second = Record::from_value("b", json!({ "sessionDate": "2025-04-23T23:59:59Z" }));
    let next_midnight = Record::from_value("c", json!({ "sessionDate": "2025-04-24T00:00:00Z" }));

    assert!(query.matches(&inside));
    assert!(query.matches(&last_second));
    assert!(!query.matches(&next_midnight));
}

#[tokio::test]
async fn test_find_screen_excludes_current_user_and_hidden() {
    let mut geocoder = MockGeocoder::new();
    geocoder
        .expect_geocode()
        .withf(|location| location.to_string() == "Nugegoda")
        .times(1)
        .returning(|_| Coordinate::new(6.8649, 79.8997));

    let mut find = FindScreen::new(seeded_store(), Arc::new(geocoder), Some("me".to_string()));
    find.activate().await;

    let pins = find.pins.loaded().unwrap();
    let ids: Vec<_> = pins.pins.iter().map(|p| p.user_id.as_str()).collect();
    assert_eq!(ids, vec!["u1", "u2"]);
    assert_eq!(pins.hidden, 1);
}

#[tokio::test]
async fn test_find_screen_store_failure() {
    let mut store = MockDocumentStore::new();
    store
        .expect_fetch_collection()
        .returning(|_, _| Err(StudyError::Store(eyre::eyre!("timeout"))));

    let mut find = FindScreen::new(Arc::new(store), Arc::new(MockGeocoder::new()), None);
    find.activate().await;

    assert_eq!(find.pins.error(), Some("Store error: timeout"));
}

#[tokio::test]
async fn test_screens_accept_trait_objects() {
    let store: Arc<dyn DocumentStore> = seeded_store();
    let mut home = HomeScreen::new(store, Tz::UTC);
    home.activate_at(now()).await;

    assert_eq!(home.groups.loaded().map(Vec::len), Some(3));
}

#[tokio::test]
async fn test_group_sessions_screen_filters_selected_day() {
    let mut screen = GroupSessionsScreen::new(seeded_store(), Tz::UTC, "Calculus");
    screen.activate().await;

    let list = screen.sessions.loaded().unwrap();
    let ids: Vec<_> = list.sessions.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["s2", "s1", "s3"]);
    assert_eq!(list.skipped, 1);

    screen.select_day(NaiveDate::from_ymd_opt(2025, 4, 23).unwrap());
    let names: Vec<_> = screen
        .selected_sessions()
        .iter()
        .map(|s| s.session_name.as_str())
        .collect();
    assert_eq!(names, vec!["Midnight", "Limits"]);

    screen.select_day(NaiveDate::from_ymd_opt(2025, 4, 25).unwrap());
    assert!(screen.selected_sessions().is_empty());
}
