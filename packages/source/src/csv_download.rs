//! Station CSV parser.
//!
//! Parses the raw feed bytes into a [`StationTable`], looking columns up by
//! the header names in a [`ColumnMapping`]. Extra columns are ignored.

use aed_map_station_models::{StationRecord, StationTable};

use crate::{ColumnMapping, FetchError};

/// Resolved header positions for the mapped columns.
struct ColumnIndexes {
    title: usize,
    location_description: usize,
    latitude: usize,
    longitude: usize,
}

impl ColumnIndexes {
    fn resolve(headers: &[String], columns: &ColumnMapping) -> Result<Self, FetchError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| FetchError::MissingColumn {
                    column: name.to_owned(),
                })
        };

        Ok(Self {
            title: find(&columns.title)?,
            location_description: find(&columns.location_description)?,
            latitude: find(&columns.latitude)?,
            longitude: find(&columns.longitude)?,
        })
    }
}

/// Parses CSV bytes into a station table, preserving row order.
///
/// # Errors
///
/// Returns [`FetchError`] if the CSV is malformed, has no header row, lacks
/// one of the mapped columns, or has a non-numeric coordinate.
pub fn parse_stations(bytes: &[u8], columns: &ColumnMapping) -> Result<StationTable, FetchError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_owned())
        .collect();

    if headers.iter().all(String::is_empty) {
        return Err(FetchError::Empty);
    }

    let idx = ColumnIndexes::resolve(&headers, columns)?;
    let mut stations = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;
        let cell = |pos: usize| record.get(pos).unwrap_or("").trim();

        let latitude = parse_coordinate(cell(idx.latitude), row, &columns.latitude)?;
        let longitude = parse_coordinate(cell(idx.longitude), row, &columns.longitude)?;

        stations.push(StationRecord::new(
            cell(idx.title),
            cell(idx.location_description),
            latitude,
            longitude,
        ));
    }

    Ok(StationTable::new(stations))
}

fn parse_coordinate(value: &str, row: usize, column: &str) -> Result<f64, FetchError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FetchError::InvalidCoordinate {
            row,
            column: column.to_owned(),
            value: value.to_owned(),
        })
}
