#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Viewport filtering and nearest-station ranking.
//!
//! Selects the stations inside the visible map rectangle, measures each
//! one's ellipsoidal geodesic distance to the viewport center, and returns
//! the nearest few in ascending order. The geodesic itself comes from
//! [`geo::Geodesic`].

use aed_map_station_models::{LatLng, RankedResult, StationRecord, ViewportBounds};
use geo::{Distance as _, Geodesic, Point};

/// Number of results shown in the nearest-stations table.
pub const DEFAULT_LIMIT: usize = 10;

/// Geodesic distance in meters between two coordinates on the reference
/// ellipsoid.
#[must_use]
pub fn geodesic_distance(from: LatLng, to: LatLng) -> f64 {
    Geodesic.distance(Point::new(from.lng, from.lat), Point::new(to.lng, to.lat))
}

/// Ranks the stations inside `bounds` by geodesic distance to `center`,
/// keeping at most `limit` of them.
#[must_use]
pub fn rank(
    stations: &[StationRecord],
    bounds: &ViewportBounds,
    center: LatLng,
    limit: usize,
) -> Vec<RankedResult> {
    rank_by(stations, bounds, center, limit, geodesic_distance)
}

/// Same as [`rank`], but with a caller-supplied distance function.
///
/// The sort is stable: stations at equal distance keep their table order.
#[must_use]
pub fn rank_by<F>(
    stations: &[StationRecord],
    bounds: &ViewportBounds,
    center: LatLng,
    limit: usize,
    distance: F,
) -> Vec<RankedResult>
where
    F: Fn(LatLng, LatLng) -> f64,
{
    let mut ranked: Vec<RankedResult> = stations
        .iter()
        .filter(|station| bounds.contains(station.position()))
        .map(|station| RankedResult::from_station(station, distance(center, station.position())))
        .collect();

    log::debug!(
        "{} of {} stations inside viewport",
        ranked.len(),
        stations.len()
    );

    ranked.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));
    ranked.truncate(limit);
    ranked
}
