#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View construction for the AED station map.
//!
//! [`map::render_map`] describes the map widget for the initial render.
//! [`on_interaction`] turns the latest viewport event into the commands the
//! frontend applies after each pan or zoom: currently just the
//! nearest-stations table built by [`table::render_table`].

pub mod map;
pub mod table;

pub use aed_map_proximity::DEFAULT_LIMIT;

use aed_map_station_models::{InteractionEvent, LatLng, StationRecord};
use serde::Serialize;

use crate::table::TableView;

/// What the frontend should draw after an interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderCommands {
    /// Nearest-stations table. `None` until the user has interacted with
    /// the map.
    pub table: Option<TableView>,
}

/// Handles the most recent map interaction.
///
/// Without an event nothing is computed and no table is produced. A
/// missing center falls back to `default_center`.
#[must_use]
pub fn on_interaction(
    stations: &[StationRecord],
    event: Option<&InteractionEvent>,
    default_center: LatLng,
    limit: usize,
) -> RenderCommands {
    let Some(event) = event else {
        return RenderCommands { table: None };
    };

    let center = event.center_or(default_center);
    let results = aed_map_proximity::rank(stations, &event.bounds, center, limit);

    log::debug!(
        "Ranked {} stations around ({}, {})",
        results.len(),
        center.lat,
        center.lng
    );

    RenderCommands {
        table: Some(table::render_table(&results)),
    }
}

#[cfg(test)]
mod tests {
    use aed_map_station_models::ViewportBounds;

    use super::*;

    fn stations() -> Vec<StationRecord> {
        vec![
            StationRecord::new("north", "", 34.08, 133.0),
            StationRecord::new("south", "", 34.02, 133.0),
            StationRecord::new("outside", "", 35.0, 133.0),
        ]
    }

    fn viewport() -> ViewportBounds {
        ViewportBounds::new(LatLng::new(34.0, 132.9), LatLng::new(34.1, 133.1))
    }

    #[test]
    fn no_event_means_no_table() {
        let commands = on_interaction(&stations(), None, map::DEFAULT_CENTER, 10);
        assert!(commands.table.is_none());
    }

    #[test]
    fn event_produces_ranked_table() {
        let event = InteractionEvent {
            bounds: viewport(),
            center: Some(LatLng::new(34.03, 133.0)),
        };
        let commands = on_interaction(&stations(), Some(&event), map::DEFAULT_CENTER, 10);

        let table = commands.table.unwrap();
        let titles: Vec<&str> = table.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["south", "north"]);
    }

    #[test]
    fn missing_center_uses_default() {
        let event = InteractionEvent {
            bounds: viewport(),
            center: None,
        };
        // Default center sits right on "north".
        let commands = on_interaction(&stations(), Some(&event), LatLng::new(34.08, 133.0), 10);

        let table = commands.table.unwrap();
        assert_eq!(table.rows[0].title, "north");
        assert!(table.rows[0].distance.abs() < 1e-6);
    }

    #[test]
    fn empty_viewport_gives_empty_table() {
        let event = InteractionEvent {
            bounds: ViewportBounds::new(LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)),
            center: None,
        };
        let commands = on_interaction(&stations(), Some(&event), map::DEFAULT_CENTER, 10);
        assert!(commands.table.unwrap().rows.is_empty());
    }

    #[test]
    fn respects_limit() {
        let event = InteractionEvent {
            bounds: viewport(),
            center: None,
        };
        let commands = on_interaction(&stations(), Some(&event), map::DEFAULT_CENTER, 1);
        assert_eq!(commands.table.unwrap().rows.len(), 1);
    }
}
