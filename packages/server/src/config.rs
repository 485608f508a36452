//! Server configuration.
//!
//! Settings are read from a TOML file (default `aed_map.toml`). Every
//! section is optional and falls back to the built-in defaults; only the
//! dataset source URL is required, and it may also come from the
//! `AED_MAP_SOURCE_URL` environment variable or `--source-url`.

use std::path::{Path, PathBuf};

use aed_map_render::map::MapSettings;
use aed_map_server_models::ApiPage;
use aed_map_source::ColumnMapping;
use serde::Deserialize;

/// Default config file path.
pub const DEFAULT_CONFIG_PATH: &str = "aed_map.toml";

/// Errors loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config file {}: {source}", .path.display())]
    Io {
        /// Config file path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`AppConfig`].
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// No dataset source URL was configured anywhere.
    #[error("No station source URL configured (set `url` in the config file, AED_MAP_SOURCE_URL, or --source-url)")]
    MissingSourceUrl,
}

/// Page chrome shown above the map.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Page title.
    pub title: String,
    /// Link to the curated external map.
    pub my_map_url: String,
    /// Link text for the curated map.
    pub my_map_label: String,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            title: "いまばりAEDステーション".to_string(),
            my_map_url: "https://www.google.com/maps/d/edit?mid=18z3-aAlx_l3oYY1mM-OJwKo2TlJFXT0&usp=sharing".to_string(),
            my_map_label: "マイマップ".to_string(),
        }
    }
}

impl From<&PageSettings> for ApiPage {
    fn from(page: &PageSettings) -> Self {
        Self {
            title: page.title.clone(),
            my_map_url: page.my_map_url.clone(),
            my_map_label: page.my_map_label.clone(),
        }
    }
}

/// Nearest-stations ranking settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RankingSettings {
    /// Maximum number of rows in the result table.
    pub limit: usize,
}

impl Default for RankingSettings {
    fn default() -> Self {
        Self {
            limit: aed_map_render::DEFAULT_LIMIT,
        }
    }
}

/// Full application configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Station CSV source (`http(s)://`, `file://`, or a path).
    pub url: Option<String>,
    /// Page chrome.
    pub page: PageSettings,
    /// Map widget settings.
    pub map: MapSettings,
    /// CSV column names.
    pub columns: ColumnMapping,
    /// Ranking settings.
    pub ranking: RankingSettings,
}

impl AppConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid TOML or has
    /// fields of the wrong type.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from `path`. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                log::info!("Loading config from {}", path.display());
                Self::from_toml_str(&contents)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Replaces the source URL when `url` is set.
    #[must_use]
    pub fn with_source_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.url = Some(url);
        }
        self
    }

    /// The configured source URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSourceUrl`] if no URL is configured.
    pub fn source_url(&self) -> Result<&str, ConfigError> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or(ConfigError::MissingSourceUrl)
    }
}

#[cfg(test)]
mod tests {
    use aed_map_render::map::{DEFAULT_CENTER, DEFAULT_TILE_URL};

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.map.center, DEFAULT_CENTER);
        assert_eq!(config.map.zoom, 16);
        assert_eq!(config.map.tile_url, DEFAULT_TILE_URL);
        assert_eq!(config.columns.latitude, "緯度");
        assert_eq!(config.ranking.limit, 10);
        assert_eq!(config.page.title, "いまばりAEDステーション");
        assert!(matches!(
            config.source_url(),
            Err(ConfigError::MissingSourceUrl)
        ));
    }

    #[test]
    fn parses_overrides() {
        let config = AppConfig::from_toml_str(
            r#"
url = "https://example.org/aed.csv"

[map]
center = { lat = 35.0, lng = 135.0 }
zoom = 12

[columns]
title = "name"

[ranking]
limit = 5
"#,
        )
        .unwrap();

        assert_eq!(config.source_url().unwrap(), "https://example.org/aed.csv");
        assert!((config.map.center.lat - 35.0).abs() < f64::EPSILON);
        assert_eq!(config.map.zoom, 12);
        assert_eq!(config.map.popup_max_width, 300);
        assert_eq!(config.columns.title, "name");
        assert_eq!(config.columns.longitude, "経度");
        assert_eq!(config.ranking.limit, 5);
    }

    #[test]
    fn source_url_override_wins() {
        let config = AppConfig::from_toml_str(r#"url = "from-file.csv""#)
            .unwrap()
            .with_source_url(Some("from-cli.csv".to_string()));
        assert_eq!(config.source_url().unwrap(), "from-cli.csv");

        let unchanged = config.with_source_url(Some("   ".to_string()));
        assert_eq!(unchanged.source_url().unwrap(), "from-cli.csv");
    }

    #[test]
    fn rejects_wrong_types() {
        let err = AppConfig::from_toml_str("[ranking]\nlimit = \"ten\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/aed_map.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
