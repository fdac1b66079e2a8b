use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use studyconnect_core::{
    models::session::Session,
    record::{collections, fields},
    store::{Direction, DocumentStore, Query},
};

use crate::aggregator::{SessionList, decode_sessions};
use crate::state::FetchState;

/// Sessions of one group with a selectable day strip.
pub struct GroupSessionsScreen<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    timezone: Tz,
    group_name: String,
    selected_day: NaiveDate,
    pub sessions: FetchState<SessionList>,
}

impl<S: DocumentStore + ?Sized> GroupSessionsScreen<S> {
    pub fn new(store: Arc<S>, timezone: Tz, group_name: impl Into<String>) -> Self {
        let selected_day = Utc::now().with_timezone(&timezone).date_naive();
        Self {
            store,
            timezone,
            group_name: group_name.into(),
            selected_day,
            sessions: FetchState::default(),
        }
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn selected_day(&self) -> NaiveDate {
        self.selected_day
    }

    pub fn select_day(&mut self, day: NaiveDate) {
        self.selected_day = day;
    }

    pub async fn activate(&mut self) {
        self.sessions.begin();
        let query = Query::new()
            .where_eq(fields::GROUP_NAME, self.group_name.as_str())
            .order_by(fields::SESSION_DATE, Direction::Ascending);
        let result = self
            .store
            .fetch_collection(collections::SESSIONS, &query)
            .await;
        self.sessions
            .finish(result.map(|records| decode_sessions(&records)));
    }

    /// Loaded sessions whose local date is the selected day.
    pub fn selected_sessions(&self) -> Vec<&Session> {
        let Some(list) = self.sessions.loaded() else {
            return Vec::new();
        };
        list.sessions
            .iter()
            .filter(|s| s.session_date.with_timezone(&self.timezone).date_naive() == self.selected_day)
            .collect()
    }
}
