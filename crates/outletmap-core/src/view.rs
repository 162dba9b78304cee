//! Presentation of the outlet store: marker icons, popups, and GeoJSON.

use serde_json::{json, Value};

use crate::outlet::{HighlightState, Outlet};
use crate::store::OutletStore;

const MARKER_SHADOW_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.7.1/images/marker-shadow.png";

/// Initial viewport of the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
}

impl Default for MapView {
    /// Central Kuala Lumpur at street-level zoom.
    fn default() -> Self {
        Self {
            center_latitude: 3.139,
            center_longitude: 101.684_1,
            zoom: 13,
        }
    }
}

/// Marker artwork for a highlight state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcon {
    pub color: &'static str,
    pub icon_url: &'static str,
    pub shadow_url: &'static str,
}

impl MarkerIcon {
    #[must_use]
    pub fn for_state(state: HighlightState) -> Self {
        let (color, icon_url) = match state {
            HighlightState::Default => (
                "blue",
                "https://cdnjs.cloudflare.com/ajax/libs/leaflet/1.7.1/images/marker-icon.png",
            ),
            HighlightState::Proximity => (
                "yellow",
                "https://cdn.rawgit.com/pointhi/leaflet-color-markers/master/img/marker-icon-2x-yellow.png",
            ),
            HighlightState::Matched => (
                "red",
                "https://cdn.jsdelivr.net/gh/pointhi/leaflet-color-markers@master/img/marker-icon-2x-red.png",
            ),
        };
        Self {
            color,
            icon_url,
            shadow_url: MARKER_SHADOW_URL,
        }
    }
}

/// Usage hint shown above the map.
#[must_use]
pub fn click_hint(radius_meters: f64) -> String {
    format!(
        "Click a marker in the map to view details and highlight nearby outlets within {} radius",
        format_radius(radius_meters)
    )
}

fn format_radius(radius_meters: f64) -> String {
    if radius_meters >= 1_000.0 && (radius_meters % 1_000.0).abs() < f64::EPSILON {
        format!("{}km", radius_meters / 1_000.0)
    } else {
        format!("{radius_meters}m")
    }
}

/// One line per marker: index, icon color, name, and drawn position.
#[must_use]
pub fn marker_line(index: usize, outlet: &Outlet) -> String {
    let icon = MarkerIcon::for_state(outlet.highlight);
    let position = outlet.position();
    format!(
        "{index:>4}  {:<6}  {}  ({:.6}, {:.6})",
        icon.color, outlet.name, position.latitude, position.longitude
    )
}

/// Popup contents for a clicked marker.
#[must_use]
pub fn popup_lines(outlet: &Outlet) -> Vec<String> {
    vec![
        outlet.name.clone(),
        format!("Address: {}", outlet.address),
        format!("Operating hour: {}", outlet.operating_hour),
        format!("Waze Link: {}", outlet.waze),
        format!(
            "Latitude: {} Longitude: {}",
            outlet.latitude, outlet.longitude
        ),
    ]
}

/// Render the store as a GeoJSON `FeatureCollection` of marker points.
///
/// Positions are drawn positions, in GeoJSON's `[longitude, latitude]` order.
#[must_use]
pub fn to_geojson(store: &OutletStore) -> Value {
    let features: Vec<Value> = store
        .iter()
        .map(|outlet| {
            let position = outlet.position();
            let icon = MarkerIcon::for_state(outlet.highlight);
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [position.longitude, position.latitude],
                },
                "properties": {
                    "name": outlet.name,
                    "address": outlet.address,
                    "operating_hour": outlet.operating_hour,
                    "waze": outlet.waze,
                    "latitude": outlet.latitude,
                    "longitude": outlet.longitude,
                    "highlight": outlet.highlight,
                    "marker-color": icon.color,
                    "marker-icon": icon.icon_url,
                },
            })
        })
        .collect();

    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}
