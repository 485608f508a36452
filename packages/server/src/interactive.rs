//! Interactive mode for the server.
//!
//! Prompts the user for the station source, bind address, and port before
//! starting the server.

use dialoguer::{Confirm, Input};

use crate::config::AppConfig;
use crate::{AppState, ServeOptions};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Prompts are pre-filled from `config` and `defaults`. Delegates to
/// [`super::run_server`] once the user confirms.
///
/// # Errors
///
/// Returns an `std::io::Result` error if no source URL is entered or the
/// underlying server fails to start.
#[allow(clippy::future_not_send)]
pub async fn run(config: AppConfig, defaults: ServeOptions) -> std::io::Result<()> {
    println!("AED Station Map Server");
    println!();

    let current_url = config.url.clone().unwrap_or_default();
    let source_url: String = Input::new()
        .with_prompt("Station CSV source (URL or path)")
        .default(current_url.clone())
        .allow_empty(true)
        .interact_text()
        .unwrap_or(current_url);

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or_else(|_| defaults.bind_addr.clone());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let config = config.with_source_url(Some(source_url));
    let state = AppState::new(config).map_err(std::io::Error::other)?;

    if !Confirm::new()
        .with_prompt(format!(
            "Serve {} on {bind_addr}:{port}?",
            state.source_url
        ))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    let options = ServeOptions {
        bind_addr,
        port,
        ..defaults
    };

    super::run_server(state, options).await
}
