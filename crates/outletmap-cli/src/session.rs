//! Drives [`AppState`] against the live backend.
//!
//! The state machine decides what to fetch; the session performs the fetch
//! and feeds the outcome back in. Requests run one at a time, and a request
//! failure becomes state rather than an error returned to the caller.

use outletmap_api::OutletApiClient;
use outletmap_core::{AppState, Effect, Event};

pub(crate) struct Session {
    state: AppState,
    client: OutletApiClient,
}

impl Session {
    pub(crate) fn new(client: OutletApiClient, radius_meters: f64) -> Self {
        Self {
            state: AppState::new(radius_meters),
            client,
        }
    }

    pub(crate) fn state(&self) -> &AppState {
        &self.state
    }

    /// Apply `event`, then run effects until the state machine is idle.
    pub(crate) async fn dispatch(&mut self, event: Event) {
        let mut effect = self.state.update(event);
        loop {
            let next = match effect {
                Effect::None => return,
                Effect::FetchOutlets => {
                    let result = self
                        .client
                        .fetch_outlets()
                        .await
                        .map_err(|e| e.failure());
                    Event::OutletsLoaded(result)
                }
                Effect::FetchSearch { request_id, query } => {
                    let result = self.client.search(&query).await.map_err(|e| e.failure());
                    Event::SearchCompleted { request_id, result }
                }
            };
            effect = self.state.update(next);
        }
    }

    pub(crate) async fn load(&mut self) {
        self.dispatch(Event::LoadRequested).await;
    }

    pub(crate) async fn search(&mut self, query: &str) {
        self.dispatch(Event::SearchSubmitted {
            query: query.to_owned(),
        })
        .await;
    }

    /// Click the marker at `index`. Returns `false` if there is no such marker.
    pub(crate) async fn click(&mut self, index: usize) -> bool {
        if self.state.outlets().get(index).is_none() {
            return false;
        }
        self.dispatch(Event::MarkerClicked { index }).await;
        true
    }

    /// Click the first marker named `name`, returning its index.
    pub(crate) async fn click_name(&mut self, name: &str) -> Option<usize> {
        let index = self.state.outlets().find_by_name(name)?;
        self.dispatch(Event::MarkerClicked { index }).await;
        Some(index)
    }
}
