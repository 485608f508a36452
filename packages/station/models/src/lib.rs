#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! AED station, viewport, and ranking types.
//!
//! These types are shared by the dataset loader, the proximity ranker, the
//! view renderers, and the HTTP server. Viewport types deserialize from the
//! payload shape emitted by the browser map widget
//! (`{ bounds: { _southWest, _northEast }, center }`).

use serde::{Deserialize, Serialize};

/// Base URL of the external routing service used for navigation links.
pub const NAVIGATION_BASE_URL: &str = "https://www.google.com/maps/dir/?api=1&destination=";

/// A WGS-84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

impl LatLng {
    /// Creates a new coordinate.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Builds the navigation link for a station at the given coordinate.
///
/// Coordinates are written in shortest round-trip form and always carry a
/// decimal point (`34.0`, not `34`), which is what the routing service
/// links in the published dataset look like.
#[must_use]
pub fn navigation_url(latitude: f64, longitude: f64) -> String {
    format!("{NAVIGATION_BASE_URL}{latitude:?},{longitude:?}")
}

/// One AED station from the source table.
///
/// Fields are private so the derived navigation URL can never drift from
/// the coordinates it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    title: String,
    location_description: String,
    latitude: f64,
    longitude: f64,
    navigation_url: String,
}

impl StationRecord {
    /// Creates a station and derives its navigation URL.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        location_description: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            title: title.into(),
            location_description: location_description.into(),
            latitude,
            longitude,
            navigation_url: navigation_url(latitude, longitude),
        }
    }

    /// Short label shown in tooltips and the result table.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text address or placement description.
    #[must_use]
    pub fn location_description(&self) -> &str {
        &self.location_description
    }

    /// Latitude in decimal degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in decimal degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Station position.
    #[must_use]
    pub const fn position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Routing link to this station.
    #[must_use]
    pub fn navigation_url(&self) -> &str {
        &self.navigation_url
    }
}

/// The loaded station dataset, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StationTable {
    stations: Vec<StationRecord>,
}

impl StationTable {
    /// Wraps an ordered list of stations.
    #[must_use]
    pub const fn new(stations: Vec<StationRecord>) -> Self {
        Self { stations }
    }

    /// All stations in source order.
    #[must_use]
    pub fn stations(&self) -> &[StationRecord] {
        &self.stations
    }

    /// Number of stations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the table has no stations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl From<Vec<StationRecord>> for StationTable {
    fn from(stations: Vec<StationRecord>) -> Self {
        Self::new(stations)
    }
}

/// Rectangular area currently visible in the map view.
///
/// No antimeridian handling: a viewport whose west edge is east of its
/// east edge matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    /// South-west corner.
    #[serde(rename = "_southWest")]
    pub south_west: LatLng,
    /// North-east corner.
    #[serde(rename = "_northEast")]
    pub north_east: LatLng,
}

impl ViewportBounds {
    /// Creates bounds from the south-west and north-east corners.
    #[must_use]
    pub const fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Inclusive rectangle test. Points on any edge are inside.
    #[must_use]
    pub fn contains(&self, point: LatLng) -> bool {
        self.south_west.lat <= point.lat
            && point.lat <= self.north_east.lat
            && self.south_west.lng <= point.lng
            && point.lng <= self.north_east.lng
    }
}

/// A single snapshot of the user's most recent map interaction.
///
/// Extra fields sent by the widget (zoom, last click, ...) are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    /// Visible viewport.
    pub bounds: ViewportBounds,
    /// Viewport center, if the widget reported one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LatLng>,
}

impl InteractionEvent {
    /// Returns the reported center, or `default_center` when absent.
    #[must_use]
    pub fn center_or(&self, default_center: LatLng) -> LatLng {
        self.center.unwrap_or(default_center)
    }
}

/// A station selected for the result table, with its distance from the
/// viewport center.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    /// Station title.
    pub title: String,
    /// Station location description.
    pub location_description: String,
    /// Geodesic distance from the viewport center in meters.
    pub distance_meters: f64,
    /// Routing link to the station.
    pub navigation_url: String,
}

impl RankedResult {
    /// Projects a station together with its computed distance.
    #[must_use]
    pub fn from_station(station: &StationRecord, distance_meters: f64) -> Self {
        Self {
            title: station.title.clone(),
            location_description: station.location_description.clone(),
            distance_meters,
            navigation_url: station.navigation_url.clone(),
        }
    }
}
