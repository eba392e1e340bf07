//! # hexkit-demo
//!
//! Composition root that wires the in-memory adapter into the service
//! templates and runs a scripted scenario.
//!
//! ## Responsibilities
//! - Load configuration (`hexkit.toml`, env vars)
//! - Install the `tracing` subscriber
//! - Construct repositories and services, injecting them via port traits
//! - Drive a create/update/delete walk-through and log the outcomes
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;
mod scenario;

use config::Config;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let filter =
        EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        tenants = ?config.demo.tenants,
        application_id = config.service.application_id.as_deref(),
        change_hook = ?config.service.change_hook,
        "starting hexkit demo"
    );

    scenario::run(config.service, &config.demo.tenants).await?;

    tracing::info!("scenario finished");
    Ok(())
}
