use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use taskboard::config;
use taskboard::http::HttpServer;
use taskboard::lifecycle::{signals, Shutdown};
use taskboard::observability::{logging, metrics};
use taskboard::store;

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "Task board API service", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "TASKBOARD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = config::load(args.config.as_deref())?;

    logging::init(&config.observability);
    tracing::info!("taskboard v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        store_uri = %config.store.uri,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let store = store::open(&config.store.uri).await?;

    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
