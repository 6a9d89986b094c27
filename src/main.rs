//! COVID-19 Dashboard Server
//!
//! Run with: cargo run --bin covid-dashboard
//!
//! Takes no arguments. Loads the dataset once, renders the page and serves
//! it on http://127.0.0.1:8050 until interrupted.
//!
//! # Configuration
//!
//! Optional. Read from the first existing `config.toml` among the user
//! config dir, `/etc/covid-dashboard/` and the working directory, then
//! overridden by:
//! - `COVID_DASHBOARD_DATASET`: Long-format CSV path (default: data/covid_daily.csv)
//! - `COVID_DASHBOARD_HOST`: Host to bind to (default: 127.0.0.1)
//! - `COVID_DASHBOARD_PORT`: Port to listen on (default: 8050)
//! - `COVID_DASHBOARD_LOG_LEVEL` / `RUST_LOG`: Log level (default: info)
//! - `COVID_DASHBOARD_LOG_FORMAT`: pretty or json

use covid_dashboard::api::{serve, AppState};
use covid_dashboard::config::Config;
use covid_dashboard::dataset;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, config_path) = Config::resolve(None)?;
    config.logging.init()?;

    tracing::info!("Starting COVID-19 Dashboard v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => tracing::info!("Config file: {:?}", path),
        None => tracing::info!("No config file found, using defaults"),
    }

    // A dataset that fails to load is fatal
    let dataset = match dataset::load(&config.dataset) {
        Ok(dataset) => Arc::new(dataset),
        Err(e) => {
            tracing::error!(error = %e, "Startup failure: dataset could not be loaded");
            return Err(e.into());
        }
    };

    let state = AppState::new(dataset, config.api.clone())?;

    serve(state, &config.api).await?;

    tracing::info!("COVID-19 Dashboard stopped");
    Ok(())
}
