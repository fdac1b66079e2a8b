use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use studyconnect_core::{
    models::group::GroupDisplay,
    record::collections,
    store::{DocumentStore, Query},
};
use tracing::info;

use crate::aggregator::{SessionAggregate, aggregate_sessions, build_group_display_list};
use crate::state::FetchState;

/// Group cards, today's session count and the next upcoming session.
pub struct HomeScreen<S: DocumentStore + ?Sized> {
    store: Arc<S>,
    timezone: Tz,
    pub groups: FetchState<Vec<GroupDisplay>>,
    pub sessions: FetchState<SessionAggregate>,
}

impl<S: DocumentStore + ?Sized> HomeScreen<S> {
    pub fn new(store: Arc<S>, timezone: Tz) -> Self {
        Self {
            store,
            timezone,
            groups: FetchState::default(),
            sessions: FetchState::default(),
        }
    }

    pub async fn activate(&mut self) {
        self.activate_at(Utc::now()).await;
    }

    /// Fetches groups and sessions concurrently; either may fail on its own.
    pub async fn activate_at(&mut self, now: DateTime<Utc>) {
        self.groups.begin();
        self.sessions.begin();

        let all = Query::new();
        let (groups, sessions) = tokio::join!(
            self.store.fetch_collection(collections::GROUPS, &all),
            self.store.fetch_collection(collections::SESSIONS, &all),
        );

        self.groups
            .finish(groups.map(|records| build_group_display_list(&records)));
        let timezone = self.timezone;
        self.sessions
            .finish(sessions.map(|records| aggregate_sessions(&records, now, &timezone)));

        if let (Some(groups), Some(sessions)) = (self.groups.loaded(), self.sessions.loaded()) {
            info!(
                "Home loaded: {} groups, {} sessions today, next session: {}",
                groups.len(),
                sessions.today_count,
                sessions
                    .next_session
                    .as_ref()
                    .map_or("none", |s| s.session_name.as_str())
            );
        }
    }

    /// Case-insensitive substring search over loaded group names. An empty
    /// term returns every group.
    pub fn search_groups(&self, term: &str) -> Vec<&GroupDisplay> {
        let term = term.trim().to_lowercase();
        self.groups
            .loaded()
            .map(|groups| {
                groups
                    .iter()
                    .filter(|g| term.is_empty() || g.name.to_lowercase().contains(&term))
                    .collect()
            })
            .unwrap_or_default()
    }
}
