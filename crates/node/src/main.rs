//! intent-node - the client-side node of the intention-sharing network.
//!
//! Assembles the domain stores, the key directory and relay clients, and
//! the sharing orchestrator, then idles until a shutdown signal arrives.
//! Inbound intake (pull from the relay or push via webhook) is layered on
//! top of [`node::app::App::handle_incoming_envelope`] by the deployment.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use url::Url;

use common::clock::Clock;
use common::intention::MemoryIntentionStore;
use common::location::MemoryLocationStore;
use common::person::MemoryPersonStore;

use node::app::App;
use node::clients::{KeyServiceClient, RoutingServiceClient};
use node::config::Config;
use node::process::{graceful_shutdown_blocker, register_panic_logger};

/// Client node for the federated intention-sharing network
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of the key directory service
    #[arg(long)]
    key_service_url: Option<Url>,

    /// Base URL of the routing relay service
    #[arg(long)]
    routing_service_url: Option<Url>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<tracing::Level>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = args.key_service_url {
        config.key_service_url = url;
    }
    if let Some(url) = args.routing_service_url {
        config.routing_service_url = url;
    }
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    // Initialize tracing
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let env_filter = EnvFilter::builder()
        .with_default_directive(config.log_level.into())
        .from_env_lossy();
    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);
    tracing_subscriber::registry().with(stdout_layer).init();

    register_panic_logger();

    tracing::info!(
        key_service = %config.key_service_url,
        routing_service = %config.routing_service_url,
        "starting intent node"
    );
    if config.project_id.is_some() {
        // The document-store adapters plug in behind the provider traits;
        // this build wires the in-memory reference stores.
        tracing::warn!("GCP_PROJECT_ID is set but persistent storage is not wired in, using in-memory stores");
    }

    let key_client = Arc::new(KeyServiceClient::new(&config.key_service_url)?);
    let routing_client = Arc::new(RoutingServiceClient::new(&config.routing_service_url)?);

    // Wiring happens here and only here; the orchestrator never reaches
    // for concretes itself. The HTTP API surface that drives the app is the
    // next layer up.
    let _app = App::new(
        MemoryIntentionStore::new(),
        MemoryLocationStore::new(),
        MemoryPersonStore::new(),
        key_client,
        routing_client,
        Clock::system(),
    );

    tracing::info!("intent node initialized, waiting for shutdown signal");

    let (shutdown_handle, _shutdown_tx, mut shutdown_rx) = graceful_shutdown_blocker();
    let _ = shutdown_rx.changed().await;
    shutdown_handle.await?;

    tracing::info!("shutdown complete");
    Ok(())
}
