use std::{
    net::{IpAddr, SocketAddr},
    str::FromStr,
    time::Duration,
};

use clap::Parser;
use server::{build_app, cli::Cli, session_store::SqliteSessionStore};
use shared::*;
use tokio::net::TcpListener;
use tower_sessions::ExpiredDeletion;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    load_dotenv()?;
    configure_tracing();

    let args = Cli::parse();
    debug!(
        port = args.port,
        bind_addr = %args.bind_addr,
        database = %args.sqlite_connection_string,
        "Starting"
    );

    let socket = SocketAddr::new(IpAddr::from_str(&args.bind_addr)?, args.port);
    let cleanup_interval = Duration::from_secs(args.session_cleanup_interval_secs.max(1));

    let (router, session_store) = build_app(args).await?;
    tokio::spawn(delete_expired_sessions(session_store, cleanup_interval));

    let listener = TcpListener::bind(socket).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn delete_expired_sessions(session_store: SqliteSessionStore, period: Duration) {
    let mut interval = tokio::time::interval(period);
    loop {
        interval.tick().await;
        if let Err(err) = session_store.delete_expired().await {
            error!(?err, "Failed to delete expired sessions");
        }
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(?err, "Unable to listen for the shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}
