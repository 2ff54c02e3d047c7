use std::net::SocketAddr;

use anyhow::Result;
use clap::Parser;
use tokio::{net::TcpListener, select, signal::unix::SignalKind};

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use ipv6geo_service::{
    GeoResolver,
    api::{AppState, router},
};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Socket address to serve the API on
    #[arg(short, long, env = "IPV6GEO_LISTEN", default_value = "127.0.0.1:8000")]
    listen: SocketAddr,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter_layer = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .json()
        .with_level(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_target(true);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let signal = async {
        let mut sig_int =
            tokio::signal::unix::signal(SignalKind::interrupt()).expect("failed to install signal");
        let mut sig_term =
            tokio::signal::unix::signal(SignalKind::terminate()).expect("failed to install signal");
        select! {
            _ = sig_int.recv() => info!(msg = "SIGINT received, stopping"),
            _ = sig_term.recv() => info!(msg = "SIGTERM received, stopping"),
        }
    };

    let app = router(AppState::new(GeoResolver::new()));
    let listener = TcpListener::bind(args.listen).await?;
    info!(msg = "Serving IPv6 geolocation API", listen = %args.listen);

    axum::serve(listener, app).with_graceful_shutdown(signal).await?;
    Ok(())
}
