use std::sync::Arc;

use studyconnect_core::{
    record::collections,
    store::{DocumentStore, Geocoder, Query},
};
use tracing::info;

use crate::aggregator::{PinSet, build_user_pins};
use crate::state::FetchState;

/// Map of other users' positions.
pub struct FindScreen<S, G>
where
    S: DocumentStore + ?Sized,
    G: Geocoder + ?Sized,
{
    store: Arc<S>,
    geocoder: Arc<G>,
    current_user_id: Option<String>,
    pub pins: FetchState<PinSet>,
}

impl<S, G> FindScreen<S, G>
where
    S: DocumentStore + ?Sized,
    G: Geocoder + ?Sized,
{
    pub fn new(store: Arc<S>, geocoder: Arc<G>, current_user_id: Option<String>) -> Self {
        Self {
            store,
            geocoder,
            current_user_id,
            pins: FetchState::default(),
        }
    }

    pub async fn activate(&mut self) {
        self.pins.begin();

        let result = self
            .store
            .fetch_collection(collections::USERS, &Query::new())
            .await;

        let outcome = match result {
            Ok(mut users) => {
                if let Some(me) = &self.current_user_id {
                    users.retain(|u| &u.id != me);
                }
                let pins = build_user_pins(&users, self.geocoder.as_ref()).await;
                info!(
                    "Find loaded: {} pins, {} geocode failures",
                    pins.pins.len(),
                    pins.geocode_failures
                );
                Ok(pins)
            }
            Err(e) => Err(e),
        };
        self.pins.finish(outcome);
    }
}
