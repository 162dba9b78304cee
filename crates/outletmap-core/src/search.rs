//! Merging a backend search result set into the outlet store.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::outlet::{GeoPoint, HighlightState, Outlet};
use crate::store::OutletStore;

/// Discriminator the backend uses for location searches. Only this kind
/// shows a result-count message.
pub const OUTLETS_IN_LOCATION: &str = "outlets_in_location";

/// One hit from `GET /search`, joined to outlets by `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultEntry {
    pub name: String,
    #[serde(default)]
    pub coordinate: Option<GeoPoint>,
}

/// Body of `GET /search?query=...`. Both fields are required; a body
/// missing either is malformed and rejected as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "type")]
    pub kind: String,
    pub data: Vec<SearchResultEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchSummary {
    /// Number of entries the backend returned.
    pub count: usize,
    pub kind: String,
    /// Number of outlets marked as matched.
    pub matched: usize,
    /// Names that appear more than once in the result set or the outlet
    /// list, where the join on name is ambiguous.
    pub duplicate_names: Vec<String>,
}

impl SearchSummary {
    /// The "Found N outlets" line, shown only for location searches.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        (self.kind == OUTLETS_IN_LOCATION)
            .then(|| format!("Found {} outlets matching your search.", self.count))
    }
}

/// Apply a search response to `store`.
///
/// Every outlet is first reset to [`HighlightState::Default`]. Then each
/// outlet whose name equals some entry's name (first entry wins) becomes
/// [`HighlightState::Matched`] and, if that entry carries a coordinate,
/// takes it as its rendered position. Other outlets are left as reset.
#[must_use]
pub fn reconcile(store: &OutletStore, response: &SearchResponse) -> (OutletStore, SearchSummary) {
    let mut by_name: HashMap<&str, &SearchResultEntry> = HashMap::new();
    let mut duplicates: BTreeSet<String> = BTreeSet::new();
    for entry in &response.data {
        if by_name.contains_key(entry.name.as_str()) {
            duplicates.insert(entry.name.clone());
        } else {
            by_name.insert(entry.name.as_str(), entry);
        }
    }

    let mut seen_outlets: BTreeSet<&str> = BTreeSet::new();
    for outlet in store {
        if by_name.contains_key(outlet.name.as_str()) && !seen_outlets.insert(outlet.name.as_str()) {
            duplicates.insert(outlet.name.clone());
        }
    }

    let updated = store.map_outlets(|outlet| match by_name.get(outlet.name.as_str()) {
        Some(entry) => Outlet {
            highlight: HighlightState::Matched,
            coordinate: entry.coordinate.or(outlet.coordinate),
            ..outlet.clone()
        },
        None => Outlet {
            highlight: HighlightState::Default,
            ..outlet.clone()
        },
    });

    let duplicate_names: Vec<String> = duplicates.into_iter().collect();
    if !duplicate_names.is_empty() {
        tracing::warn!(
            names = ?duplicate_names,
            "search results join on ambiguous outlet names; first match used"
        );
    }

    let summary = SearchSummary {
        count: response.data.len(),
        kind: response.kind.clone(),
        matched: updated.count_in(HighlightState::Matched),
        duplicate_names,
    };

    tracing::debug!(
        count = summary.count,
        matched = summary.matched,
        kind = %summary.kind,
        "reconciled search results"
    );

    (updated, summary)
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
