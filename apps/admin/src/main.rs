//! # Libreria Admin API
//!
//! Local HTTP administration service for the bookstore backend.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Admin API Server                        │
//! │                                                             │
//! │  Browser/curl ───► HTTP (8080) ───► axum routes ───►       │
//! │                                      repositories ───►      │
//! │                                      SQLite file            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bound to localhost only; anything beyond the loopback interface is the
//! operator's problem (reverse proxy, SSH tunnel). There is no
//! authentication layer.

mod error;
mod routes;

use std::net::{Ipv4Addr, SocketAddr};

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use libreria_db::{Database, DbSettings};

/// Port the admin API listens on unless `ADMIN_PORT` overrides it.
const DEFAULT_PORT: u16 = 8080;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let settings = DbSettings::from_env();
    let db = Database::new(settings.to_db_config()).await?;

    let port = std::env::var("ADMIN_PORT")
        .ok()
        .and_then(|raw| raw.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));

    let app = routes::router(db.clone()).layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "admin API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    Ok(())
}

async fn shutdown_signal() {
    // Ignore errors installing the handler; worst case Ctrl-C kills us hard.
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
