#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! AED station map server binary.
//!
//! Reads `aed_map.toml` (or `--config`), applies environment and flag
//! overrides, and serves the map.

use std::path::PathBuf;

use aed_map_server::config::{AppConfig, DEFAULT_CONFIG_PATH};
use aed_map_server::{
    AppState, DEFAULT_BIND_ADDR, DEFAULT_PORT, DEFAULT_STATIC_DIR, ServeOptions,
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "aed_map_server", about = "AED station map server")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, env = "AED_MAP_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Station CSV source (overrides `url` in the config file)
    #[arg(long, env = "AED_MAP_SOURCE_URL")]
    source_url: Option<String>,

    /// Address to bind
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind_addr: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory holding the frontend
    #[arg(long, default_value = DEFAULT_STATIC_DIR)]
    static_dir: PathBuf,

    /// Prompt for settings before starting
    #[arg(long)]
    interactive: bool,
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)?.with_source_url(cli.source_url);
    let options = ServeOptions {
        bind_addr: cli.bind_addr,
        port: cli.port,
        static_dir: cli.static_dir,
    };

    if cli.interactive {
        aed_map_server::interactive::run(config, options).await?;
        return Ok(());
    }

    let state = AppState::new(config)?;
    aed_map_server::run_server(state, options).await?;

    Ok(())
}
