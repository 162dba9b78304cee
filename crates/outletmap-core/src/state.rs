//! Application state and its event-driven transitions.
//!
//! [`AppState::update`] is the only way state changes. It never performs I/O;
//! when an event needs the network it returns an [`Effect`] for the caller to
//! run, and the caller feeds the outcome back as another [`Event`].
//!
//! Searches are sequenced: each submission gets a fresh request id and
//! supersedes whatever search was pending. A completion carrying any other id
//! is stale and ignored, so the store always reflects the latest submission.

use serde::Serialize;

use crate::outlet::RawOutlet;
use crate::search::{reconcile, SearchResponse, SearchSummary};
use crate::store::OutletStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Network failure, timeout, or non-2xx status.
    Transport,
    /// The body did not have the expected shape.
    MalformedResponse,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Transport => write!(f, "transport error"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
        }
    }
}

/// A failed request, reduced to what the view needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    LoadRequested,
    OutletsLoaded(Result<Vec<RawOutlet>, Failure>),
    MarkerClicked { index: usize },
    SearchSubmitted { query: String },
    SearchCompleted {
        request_id: u64,
        result: Result<SearchResponse, Failure>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    FetchOutlets,
    FetchSearch { request_id: u64, query: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    InFlight { request_id: u64, query: String },
    Completed(SearchSummary),
    Failed(Failure),
}

#[derive(Debug, Clone)]
pub struct AppState {
    outlets: OutletStore,
    loading: bool,
    search: SearchStatus,
    pending_search: Option<u64>,
    next_request: u64,
    last_error: Option<String>,
    radius_meters: f64,
}

impl AppState {
    #[must_use]
    pub fn new(radius_meters: f64) -> Self {
        Self {
            outlets: OutletStore::default(),
            loading: false,
            search: SearchStatus::Idle,
            pending_search: None,
            next_request: 1,
            last_error: None,
            radius_meters,
        }
    }

    #[must_use]
    pub fn outlets(&self) -> &OutletStore {
        &self.outlets
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn search_status(&self) -> &SearchStatus {
        &self.search
    }

    /// The most recent error recorded by a transition, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    #[must_use]
    pub fn radius_meters(&self) -> f64 {
        self.radius_meters
    }

    /// The result-count line for the latest completed search, if it has one.
    #[must_use]
    pub fn search_message(&self) -> Option<String> {
        match &self.search {
            SearchStatus::Completed(summary) => summary.message(),
            _ => None,
        }
    }

    /// Apply `event` and return the effect the caller should run next.
    pub fn update(&mut self, event: Event) -> Effect {
        match event {
            Event::LoadRequested => {
                self.loading = true;
                Effect::FetchOutlets
            }
            Event::OutletsLoaded(result) => {
                self.loading = false;
                match result.map(OutletStore::load) {
                    Ok(Ok(store)) => {
                        self.outlets = store;
                        self.last_error = None;
                    }
                    Ok(Err(err)) => {
                        tracing::error!(error = %err, "rejected outlet listing");
                        self.last_error = Some(err.to_string());
                    }
                    Err(failure) => {
                        tracing::error!(error = %failure, "failed to fetch outlets");
                        self.last_error = Some(failure.to_string());
                    }
                }
                Effect::None
            }
            Event::MarkerClicked { index } => {
                match self.outlets.highlight_near(index, self.radius_meters) {
                    Ok(store) => {
                        self.outlets = store;
                        self.last_error = None;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring click on unknown marker");
                        self.last_error = Some(err.to_string());
                    }
                }
                Effect::None
            }
            Event::SearchSubmitted { query } => {
                let request_id = self.next_request;
                self.next_request += 1;
                if let Some(previous) = self.pending_search.replace(request_id) {
                    tracing::debug!(previous, request_id, "superseding pending search");
                }
                self.outlets = self.outlets.reset();
                self.search = SearchStatus::InFlight {
                    request_id,
                    query: query.clone(),
                };
                Effect::FetchSearch { request_id, query }
            }
            Event::SearchCompleted { request_id, result } => {
                if self.pending_search != Some(request_id) {
                    tracing::debug!(request_id, "dropping stale search response");
                    return Effect::None;
                }
                self.pending_search = None;
                match result {
                    Ok(response) => {
                        let (store, summary) = reconcile(&self.outlets, &response);
                        self.outlets = store;
                        self.search = SearchStatus::Completed(summary);
                        self.last_error = None;
                    }
                    Err(failure) => {
                        tracing::warn!(error = %failure, "search failed; showing all outlets unhighlighted");
                        self.outlets = self.outlets.reset();
                        self.last_error = Some(failure.to_string());
                        self.search = SearchStatus::Failed(failure);
                    }
                }
                Effect::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::outlet::HighlightState;

    fn raw_ab() -> Vec<RawOutlet> {
        serde_json::from_value(json!([
            {"name": "A", "address": "", "operating_hour": "", "waze": "", "latitude": "3.0", "longitude": "101.0"},
            {"name": "B", "address": "", "operating_hour": "", "waze": "", "latitude": "3.001", "longitude": "101.001"}
        ]))
        .unwrap()
    }

    fn loaded_state() -> AppState {
        let mut state = AppState::new(5_000.0);
        assert_eq!(state.update(Event::LoadRequested), Effect::FetchOutlets);
        assert!(state.is_loading());
        assert_eq!(state.update(Event::OutletsLoaded(Ok(raw_ab()))), Effect::None);
        state
    }

    fn search_response(names: &[&str]) -> SearchResponse {
        let data: Vec<_> = names.iter().map(|n| json!({"name": n})).collect();
        serde_json::from_value(json!({"type": "outlets_in_location", "data": data})).unwrap()
    }

    fn transport_failure() -> Failure {
        Failure {
            kind: FailureKind::Transport,
            message: "connection refused".to_string(),
        }
    }

    fn submit(state: &mut AppState, query: &str) -> u64 {
        match state.update(Event::SearchSubmitted {
            query: query.to_string(),
        }) {
            Effect::FetchSearch { request_id, query: q } => {
                assert_eq!(q, query);
                request_id
            }
            other => panic!("expected FetchSearch, got {other:?}"),
        }
    }

    #[test]
    fn load_populates_store_with_defaults() {
        let state = loaded_state();
        assert!(!state.is_loading());
        assert_eq!(state.outlets().len(), 2);
        assert_eq!(state.outlets().count_in(HighlightState::Default), 2);
        assert!(state.last_error().is_none());
    }

    #[test]
    fn load_failure_keeps_previous_store() {
        let mut state = loaded_state();
        state.update(Event::LoadRequested);
        state.update(Event::OutletsLoaded(Err(transport_failure())));
        assert!(!state.is_loading());
        assert_eq!(state.outlets().len(), 2);
        assert!(state.last_error().unwrap().contains("connection refused"));
    }

    #[test]
    fn load_failure_on_first_load_leaves_empty_map() {
        let mut state = AppState::new(5_000.0);
        state.update(Event::LoadRequested);
        state.update(Event::OutletsLoaded(Err(transport_failure())));
        assert!(state.outlets().is_empty());
    }

    #[test]
    fn malformed_listing_is_rejected_wholesale() {
        let mut state = loaded_state();
        let bad: Vec<RawOutlet> = serde_json::from_value(json!([
            {"name": "X", "latitude": "1.0", "longitude": "oops"}
        ]))
        .unwrap();
        state.update(Event::OutletsLoaded(Ok(bad)));
        assert_eq!(state.outlets().len(), 2);
        assert!(state.last_error().is_some());
    }

    #[test]
    fn marker_click_highlights_both_nearby_outlets() {
        let mut state = loaded_state();
        assert_eq!(state.update(Event::MarkerClicked { index: 0 }), Effect::None);
        assert_eq!(state.outlets().count_in(HighlightState::Proximity), 2);
    }

    #[test]
    fn click_on_unknown_marker_records_error() {
        let mut state = loaded_state();
        state.update(Event::MarkerClicked { index: 9 });
        assert_eq!(state.outlets().count_in(HighlightState::Default), 2);
        assert!(state.last_error().is_some());
    }

    #[test]
    fn search_submission_resets_immediately() {
        let mut state = loaded_state();
        state.update(Event::MarkerClicked { index: 0 });
        let id = submit(&mut state, "Bangsar");
        assert_eq!(state.outlets().count_in(HighlightState::Default), 2);
        assert!(matches!(
            state.search_status(),
            SearchStatus::InFlight { request_id, .. } if *request_id == id
        ));
    }

    #[test]
    fn empty_query_still_requests_and_summarizes() {
        let mut state = loaded_state();
        let id = submit(&mut state, "");
        state.update(Event::SearchCompleted {
            request_id: id,
            result: Ok(search_response(&["A", "B", "Elsewhere"])),
        });

        match state.search_status() {
            SearchStatus::Completed(summary) => {
                assert_eq!(summary.count, 3);
                assert_eq!(summary.matched, 2);
            }
            other => panic!("expected completed search, got {other:?}"),
        }
        assert_eq!(state.outlets().count_in(HighlightState::Matched), 2);
    }

    #[test]
    fn search_completion_marks_matches() {
        let mut state = loaded_state();
        let id = submit(&mut state, "A");
        state.update(Event::SearchCompleted {
            request_id: id,
            result: Ok(search_response(&["A"])),
        });
        assert_eq!(state.outlets().get(0).unwrap().highlight, HighlightState::Matched);
        assert_eq!(state.outlets().get(1).unwrap().highlight, HighlightState::Default);
        assert_eq!(
            state.search_message().as_deref(),
            Some("Found 1 outlets matching your search.")
        );
    }

    #[test]
    fn search_failure_resets_and_reports_failure() {
        let mut state = loaded_state();
        let first = submit(&mut state, "A");
        state.update(Event::SearchCompleted {
            request_id: first,
            result: Ok(search_response(&["A"])),
        });

        let second = submit(&mut state, "B");
        state.update(Event::SearchCompleted {
            request_id: second,
            result: Err(transport_failure()),
        });

        assert_eq!(state.outlets().count_in(HighlightState::Default), 2);
        assert!(state.search_message().is_none());
        assert!(matches!(
            state.search_status(),
            SearchStatus::Failed(Failure {
                kind: FailureKind::Transport,
                ..
            })
        ));
    }

    #[test]
    fn malformed_search_response_resets_and_reports_failure() {
        let mut state = loaded_state();
        let first = submit(&mut state, "A");
        state.update(Event::SearchCompleted {
            request_id: first,
            result: Ok(search_response(&["A"])),
        });
        state.update(Event::MarkerClicked { index: 1 });

        let second = submit(&mut state, "B");
        state.update(Event::SearchCompleted {
            request_id: second,
            result: Err(Failure {
                kind: FailureKind::MalformedResponse,
                message: "search(query=B): missing field `data`".to_string(),
            }),
        });

        assert_eq!(state.outlets().count_in(HighlightState::Default), 2);
        assert!(state.search_message().is_none());
        assert!(matches!(
            state.search_status(),
            SearchStatus::Failed(Failure {
                kind: FailureKind::MalformedResponse,
                ..
            })
        ));
    }

    #[test]
    fn stale_search_response_is_ignored() {
        let mut state = loaded_state();
        let first = submit(&mut state, "A");
        let second = submit(&mut state, "B");
        assert_ne!(first, second);

        state.update(Event::SearchCompleted {
            request_id: second,
            result: Ok(search_response(&["B"])),
        });
        state.update(Event::SearchCompleted {
            request_id: first,
            result: Ok(search_response(&["A"])),
        });

        assert_eq!(state.outlets().get(0).unwrap().highlight, HighlightState::Default);
        assert_eq!(state.outlets().get(1).unwrap().highlight, HighlightState::Matched);
    }

    #[test]
    fn completion_without_pending_search_is_ignored() {
        let mut state = loaded_state();
        state.update(Event::MarkerClicked { index: 0 });
        state.update(Event::SearchCompleted {
            request_id: 42,
            result: Ok(search_response(&["A"])),
        });
        assert_eq!(state.outlets().count_in(HighlightState::Proximity), 2);
        assert_eq!(state.search_status(), &SearchStatus::Idle);
    }
}
