#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the AED station map.
//!
//! Serves the single-page frontend from `app/` and a small JSON API: the
//! page chrome, the map view with every station marker, and an interaction
//! endpoint that ranks the stations in the current viewport. The station
//! CSV is fetched on first use and cached for the life of the process.

pub mod config;
mod handlers;
pub mod interactive;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use aed_map_source::StationCache;

use crate::config::AppConfig;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default directory holding the frontend.
pub const DEFAULT_STATIC_DIR: &str = "app";

/// Shared application state.
pub struct AppState {
    /// Application configuration.
    pub config: AppConfig,
    /// Station CSV source location.
    pub source_url: String,
    /// Process-lifetime station table cache.
    pub stations: StationCache,
}

impl AppState {
    /// Builds the state for `config`, which must have a source URL.
    ///
    /// # Errors
    ///
    /// Returns [`config::ConfigError::MissingSourceUrl`] if no source URL is
    /// configured.
    pub fn new(config: AppConfig) -> Result<Self, config::ConfigError> {
        let source_url = config.source_url()?.to_owned();
        let stations = StationCache::new(config.columns.clone());
        Ok(Self {
            config,
            source_url,
            stations,
        })
    }
}

/// Where and how the HTTP server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeOptions {
    /// Bind address.
    pub bind_addr: String,
    /// Port.
    pub port: u16,
    /// Directory holding `index.html` and the frontend assets.
    pub static_dir: PathBuf,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

/// Registers the `/api` routes.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/page", web::get().to(handlers::page))
            .route("/map", web::get().to(handlers::map))
            .route("/interaction", web::post().to(handlers::interaction)),
    );
}

/// Starts the AED station map server.
///
/// Warms the station cache, then starts the Actix-Web HTTP server. A failed
/// warm-up is logged but does not stop the server; the page reports the
/// error when it asks for the map. This is a regular async function: the
/// caller provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind or
/// encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(state: AppState, options: ServeOptions) -> std::io::Result<()> {
    log::info!("Loading stations from {}...", state.source_url);
    if let Err(e) = state.stations.load(&state.source_url).await {
        log::error!("{e}");
    }

    let state = web::Data::new(state);
    let ServeOptions {
        bind_addr,
        port,
        static_dir,
    } = options;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure_api)
            // Serve frontend static files
            .service(Files::new("/", static_dir.clone()).index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
