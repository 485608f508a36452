//! Map view construction.
//!
//! Produces a serializable description of the map widget: tile layer,
//! initial center and zoom, one marker per station, and the locate control.
//! The frontend replays it as Leaflet calls.

use aed_map_station_models::{LatLng, StationRecord};
use serde::{Deserialize, Serialize};

/// Default map center (Imabari city hall).
pub const DEFAULT_CENTER: LatLng = LatLng::new(34.066_318_3, 132.997_528);

/// Default initial zoom level.
pub const DEFAULT_ZOOM: u8 = 16;

/// GSI pale tile layer.
pub const DEFAULT_TILE_URL: &str = "https://cyberjapandata.gsi.go.jp/xyz/pale/{z}/{x}/{y}.png";

/// Attribution required by the GSI tile layer.
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"https://maps.gsi.go.jp/development/ichiran.html\">国土地理院</a>";

/// Fixed map and popup layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    /// Initial center, also used when an interaction reports none.
    pub center: LatLng,
    /// Initial zoom level.
    pub zoom: u8,
    /// Tile URL template.
    pub tile_url: String,
    /// Tile attribution HTML.
    pub attribution: String,
    /// Widget width in pixels.
    pub width: u32,
    /// Widget height in pixels.
    pub height: u32,
    /// Maximum popup width in pixels.
    pub popup_max_width: u32,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            tile_url: DEFAULT_TILE_URL.to_string(),
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            width: 700,
            height: 500,
            popup_max_width: 300,
        }
    }
}

/// Tile source for the base layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileLayer {
    /// URL template with `{z}`, `{x}`, `{y}` placeholders.
    pub url_template: String,
    /// Attribution HTML.
    pub attribution: String,
}

/// Marker popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    /// Popup body HTML.
    pub html: String,
    /// Maximum width in pixels.
    pub max_width: u32,
}

/// A single station marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Marker {
    /// Marker position.
    pub position: LatLng,
    /// Hover tooltip text.
    pub tooltip: String,
    /// Click popup.
    pub popup: Popup,
}

/// Complete description of the map widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapView {
    /// Initial center.
    pub center: LatLng,
    /// Initial zoom level.
    pub zoom: u8,
    /// Widget width in pixels.
    pub width: u32,
    /// Widget height in pixels.
    pub height: u32,
    /// Base tile layer.
    pub tiles: TileLayer,
    /// One marker per station, in table order.
    pub markers: Vec<Marker>,
    /// Whether the "locate current position" control is shown.
    pub locate_control: bool,
}

/// Builds the map view for every station. Nothing is filtered.
#[must_use]
pub fn render_map(stations: &[StationRecord], settings: &MapSettings) -> MapView {
    let markers = stations
        .iter()
        .map(|station| Marker {
            position: station.position(),
            tooltip: station.title().to_owned(),
            popup: Popup {
                html: popup_html(station),
                max_width: settings.popup_max_width,
            },
        })
        .collect();

    MapView {
        center: settings.center,
        zoom: settings.zoom,
        width: settings.width,
        height: settings.height,
        tiles: TileLayer {
            url_template: settings.tile_url.clone(),
            attribution: settings.attribution.clone(),
        },
        markers,
        locate_control: true,
    }
}

fn popup_html(station: &StationRecord) -> String {
    format!(
        "<a href=\"{}\" target=\"_blank\"><p>{}</p><p>{}</p></a>",
        escape_html(station.navigation_url()),
        escape_html(station.title()),
        escape_html(station.location_description()),
    )
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
