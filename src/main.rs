use crate::app_config::AppConfig;
use std::process::ExitCode;
use tracing::info;

mod app;
mod app_config;
mod coordinate_deserializer;
mod dataset;
mod domain;
mod geo;
mod position;
mod presenter;
mod session;

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).with_writer(std::io::stderr).init();

    info!("🧭 Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load()?;
    info!("✅  Loaded configuration");

    let state = app::run(&config).await?;
    if state.phase().is_terminal_error() {
        return Ok(ExitCode::FAILURE);
    }

    info!("🔥 {} found {} location(s)", env!("CARGO_PKG_NAME"), state.results().len());
    Ok(ExitCode::SUCCESS)
}
