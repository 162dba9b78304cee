//! Text rendering of the map state to stdout.

use outletmap_core::view::{click_hint, marker_line, popup_lines};
use outletmap_core::{AppState, HighlightState, MapView, SearchStatus};

/// Print the marker list, preceded by the hint line and any search message.
pub(crate) fn print_markers(state: &AppState) {
    let view = MapView::default();
    println!(
        "map centered at ({}, {}) zoom {}",
        view.center_latitude, view.center_longitude, view.zoom
    );
    println!("{}", click_hint(state.radius_meters()));
    print_search_status(state);

    let outlets = state.outlets();
    if outlets.is_empty() {
        println!("no outlets to show");
        return;
    }

    println!("{:>4}  {:<6}  NAME  (LAT, LNG)", "#", "MARKER");
    for (index, outlet) in outlets.iter().enumerate() {
        println!("{}", marker_line(index, outlet));
    }
    println!(
        "{} outlets: {} highlighted nearby, {} matched",
        outlets.len(),
        outlets.count_in(HighlightState::Proximity),
        outlets.count_in(HighlightState::Matched)
    );
}

/// Print only the highlighted markers.
pub(crate) fn print_highlighted(state: &AppState) {
    print_search_status(state);
    let mut shown = 0usize;
    for (index, outlet) in state.outlets().iter().enumerate() {
        if outlet.highlight != HighlightState::Default {
            println!("{}", marker_line(index, outlet));
            shown += 1;
        }
    }
    if shown == 0 {
        println!("no highlighted outlets");
    }
}

pub(crate) fn print_popup(state: &AppState, index: usize) {
    if let Some(outlet) = state.outlets().get(index) {
        for line in popup_lines(outlet) {
            println!("  {line}");
        }
    }
}

fn print_search_status(state: &AppState) {
    match state.search_status() {
        SearchStatus::Completed(summary) => {
            if let Some(message) = summary.message() {
                println!("{message}");
            }
        }
        SearchStatus::Failed(failure) => {
            println!("search failed ({}); showing all outlets", failure.kind);
        }
        SearchStatus::Idle | SearchStatus::InFlight { .. } => {}
    }
    if let Some(err) = state.last_error() {
        if !matches!(state.search_status(), SearchStatus::Failed(_)) {
            println!("error: {err}");
        }
    }
}
