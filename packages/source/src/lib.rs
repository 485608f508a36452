#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! AED station dataset loading.
//!
//! Fetches the station CSV from an `http(s)://` URL, a `file://` URL, or a
//! plain path, maps its columns onto [`StationRecord`] fields, and caches
//! the resulting table per source so the feed is downloaded at most once
//! per process.
//!
//! [`StationRecord`]: aed_map_station_models::StationRecord

pub mod cache;
pub mod csv_download;
pub mod fetch;

pub use cache::StationCache;

use serde::{Deserialize, Serialize};

/// Errors returned by the station loader.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The dataset could not be fetched or parsed. There is no fallback;
    /// the map cannot be rendered without it.
    #[error("Station data unavailable from {source_location}: {reason}")]
    DataUnavailable {
        /// The configured source location.
        source_location: String,
        /// What went wrong.
        #[source]
        reason: FetchError,
    },
}

/// Underlying cause of a [`SourceError::DataUnavailable`].
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed or returned a non-success status.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The CSV has no header row.
    #[error("CSV file contains no header row")]
    Empty,

    /// A required column is missing from the header row.
    #[error("Missing required column '{column}'")]
    MissingColumn {
        /// Configured column name.
        column: String,
    },

    /// A latitude or longitude cell is not a number.
    #[error("Invalid coordinate '{value}' in column '{column}' at row {row}")]
    InvalidCoordinate {
        /// 1-based data row (header excluded).
        row: usize,
        /// Column name.
        column: String,
        /// Raw cell contents.
        value: String,
    },
}

/// Maps CSV header names to station fields.
///
/// Defaults match the published AED station feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Column holding the station title.
    pub title: String,
    /// Column holding the location description.
    pub location_description: String,
    /// Column holding the latitude.
    pub latitude: String,
    /// Column holding the longitude.
    pub longitude: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            title: "タイトル".to_string(),
            location_description: "場所".to_string(),
            latitude: "緯度".to_string(),
            longitude: "経度".to_string(),
        }
    }
}
