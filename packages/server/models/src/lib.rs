#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the AED station map server.
//!
//! The map view and interaction render commands are serialized straight
//! from `aed_map_render`; this crate holds the surrounding page, health,
//! and error envelopes.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Static page chrome shown above the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPage {
    /// Page title.
    pub title: String,
    /// Link to the curated external map.
    pub my_map_url: String,
    /// Link text for [`Self::my_map_url`].
    pub my_map_label: String,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message.
    pub error: String,
}

impl ApiError {
    /// Creates an error body.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_serializes_camel_case() {
        let page = ApiPage {
            title: "いまばりAEDステーション".to_string(),
            my_map_url: "https://example.org/map".to_string(),
            my_map_label: "マイマップ".to_string(),
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["myMapUrl"], "https://example.org/map");
        assert_eq!(json["myMapLabel"], "マイマップ");
    }

    #[test]
    fn error_body_shape() {
        let json = serde_json::to_string(&ApiError::new("boom")).unwrap();
        assert_eq!(json, r#"{"error":"boom"}"#);
    }
}
