#![forbid(unsafe_code)]

//! Order daemon: serves the order API over HTTP.

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use order_daemon::{
    api::{self, AppState},
    config::{DaemonConfig, StoreConfig},
};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "order-daemon", version, about = "Coffee order service")]
struct Args {
    /// Listen address, e.g. 127.0.0.1:8000
    #[arg(long, default_value = "127.0.0.1:8000")]
    listen: SocketAddr,

    /// SQLite database file.
    #[arg(long, default_value = ".orders/orders.db")]
    db_path: PathBuf,

    /// Keep orders in memory only (nothing survives a restart).
    #[arg(long, conflicts_with = "db_path")]
    in_memory: bool,

    /// Log level (env-filter syntax).
    #[arg(long, default_value = "info")]
    log: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&args.log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DaemonConfig {
        listen: args.listen,
        store: if args.in_memory {
            StoreConfig::InMemory
        } else {
            StoreConfig::Sqlite {
                db_path: args.db_path,
            }
        },
    };
    info!(?config, "starting order daemon");

    let store = config.store.open()?;
    let app = api::router(AppState::new(store));

    info!(listen = %config.listen, "listening");
    axum::serve(tokio::net::TcpListener::bind(config.listen).await?, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
    info!("shutdown requested");
}
