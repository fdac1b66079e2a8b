use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use studyconnect_core::{
    record::{collections, fields, timestamp_value},
    store::{Direction, DocumentStore, Query},
};

use crate::aggregator::{SessionList, local_day_bounds, sessions_on_day};
use crate::state::FetchState;

/// Today's sessions, fetched with a half-open range query on `sessionDate`.
pub struct NotificationsScreen<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    timezone: Tz,
    pub sessions: FetchState<SessionList>,
}

impl<S: DocumentStore + ?Sized> NotificationsScreen<S> {
    pub fn new(store: Arc<S>, timezone: Tz) -> Self {
        Self {
            store,
            timezone,
            sessions: FetchState::default(),
        }
    }

    pub fn today_query(&self, now: DateTime<Utc>) -> Query {
        let (start, end) = local_day_bounds(now, &self.timezone);
        Query::new()
            .where_gte(fields::SESSION_DATE, timestamp_value(start))
            .where_lt(fields::SESSION_DATE, timestamp_value(end))
            .order_by(fields::SESSION_DATE, Direction::Ascending)
    }

    pub async fn activate(&mut self) {
        self.activate_at(Utc::now()).await;
    }

    pub async fn activate_at(&mut self, now: DateTime<Utc>) {
        self.sessions.begin();
        let query = self.today_query(now);
        let result = self
            .store
            .fetch_collection(collections::SESSIONS, &query)
            .await;
        let timezone = self.timezone;
        self.sessions
            .finish(result.map(|records| sessions_on_day(&records, now, &timezone)));
    }
}
