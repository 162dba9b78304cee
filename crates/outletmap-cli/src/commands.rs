//! One-shot command handlers for the CLI.
//!
//! Each handler loads the outlet list, applies at most one click and one
//! search, and renders the result. Backend failures are rendered as an empty
//! or unhighlighted map; only client construction and local I/O errors are
//! returned.

use std::path::Path;

use outletmap_api::OutletApiClient;
use outletmap_core::view::to_geojson;
use outletmap_core::AppConfig;

use crate::render::{print_markers, print_popup};
use crate::session::Session;

/// Build a session for the configured backend and load the outlet list.
pub(crate) async fn open_session(
    config: &AppConfig,
    radius_meters: Option<f64>,
) -> anyhow::Result<Session> {
    let client = OutletApiClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build outlet API client: {e}"))?;
    let radius = radius_meters.unwrap_or(config.highlight_radius_meters);
    if !radius.is_finite() || radius < 0.0 {
        anyhow::bail!("radius must be a non-negative number of meters, got {radius}");
    }
    let mut session = Session::new(client, radius);
    session.load().await;
    Ok(session)
}

/// List every outlet marker.
///
/// # Errors
///
/// Returns an error if the API client cannot be built.
pub(crate) async fn run_outlets(config: &AppConfig) -> anyhow::Result<()> {
    let session = open_session(config, None).await?;
    print_markers(session.state());
    Ok(())
}

/// Click the first outlet named `name` and show its popup and the markers.
///
/// # Errors
///
/// Returns an error if the API client cannot be built, the radius is invalid,
/// or no loaded outlet has that name.
pub(crate) async fn run_nearby(
    config: &AppConfig,
    name: &str,
    radius_meters: Option<f64>,
) -> anyhow::Result<()> {
    let mut session = open_session(config, radius_meters).await?;
    let index = click_named(&mut session, name).await?;
    print_popup(session.state(), index);
    print_markers(session.state());
    Ok(())
}

/// Run one search and show the result message and markers.
///
/// # Errors
///
/// Returns an error if the API client cannot be built.
pub(crate) async fn run_search(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let mut session = open_session(config, None).await?;
    session.search(query).await;
    print_markers(session.state());
    Ok(())
}

/// Export the marker set as GeoJSON, optionally after a click and a search.
///
/// The click is applied before the search, so a search replaces the nearby
/// highlight just as it would on the map.
///
/// # Errors
///
/// Returns an error if the API client cannot be built, the named outlet does
/// not exist, or the output file cannot be written.
pub(crate) async fn run_geojson(
    config: &AppConfig,
    search: Option<&str>,
    nearby: Option<&str>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let mut session = open_session(config, None).await?;
    if let Some(name) = nearby {
        click_named(&mut session, name).await?;
    }
    if let Some(query) = search {
        session.search(query).await;
    }

    let rendered = serde_json::to_string_pretty(&to_geojson(session.state().outlets()))?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .map_err(|e| anyhow::anyhow!("failed to write {}: {e}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                count = session.state().outlets().len(),
                "wrote GeoJSON"
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

async fn click_named(session: &mut Session, name: &str) -> anyhow::Result<usize> {
    if session.state().outlets().is_empty() {
        anyhow::bail!("no outlets loaded; cannot select \"{name}\"");
    }
    session
        .click_name(name)
        .await
        .ok_or_else(|| anyhow::anyhow!("no outlet named \"{name}\""))
}
