//! Wordhouse Server
//!
//! Server binary for the Wordhouse content backend.

mod config;
mod telemetry;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::signal;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

use wordhouse_api::{create_router, handlers::health::init_start_time, state::AppConfig, AppState};
use wordhouse_mail::{HttpRelayTransport, LogTransport, MailTransport, RelayConfig};
use wordhouse_media::{DriveClient, DriveConfig, FileLifecycle, InMemoryObjects, ObjectStore};

use crate::config::ServerConfig;
use crate::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::load().context("Failed to load configuration")?;

    init_telemetry(&config.telemetry)?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Wordhouse server"
    );

    init_start_time();

    let state = build_app_state(&config)?;
    let mut app = create_router(state);

    // SPA fallback: unmatched routes serve the built frontend when one is
    // configured.
    if let Some(dir) = &config.static_dir {
        let index = Path::new(dir).join("index.html");
        app = app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!(address = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Server shut down gracefully");
    Ok(())
}

/// Builds the application state from configuration.
fn build_app_state(config: &ServerConfig) -> Result<Arc<AppState>> {
    let objects = init_object_store(config)?;
    let mailer = init_mailer(config)?;

    let state = AppState::builder()
        .files(Arc::new(FileLifecycle::new(objects)))
        .mailer(mailer)
        .config(AppConfig {
            service_name: config.service_name.clone(),
            operator_address: config.operator_address.clone(),
            mail_from: config.mail_from.clone(),
            cors_origins: config.cors_origins.clone(),
        })
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build app state: {}", e))?;

    Ok(Arc::new(state))
}

/// Selects the object storage backend.
fn init_object_store(config: &ServerConfig) -> Result<Arc<dyn ObjectStore>> {
    match config.storage.backend.as_str() {
        "drive" => {
            let endpoint = config
                .storage
                .drive_endpoint
                .clone()
                .context("drive backend requires an endpoint")?;
            let mut drive_config = DriveConfig::new(endpoint);
            if let Some(key) = &config.storage.drive_api_key {
                drive_config = drive_config.with_api_key(key.clone());
            }
            let client = DriveClient::new(drive_config)
                .map_err(|e| anyhow::anyhow!("Failed to build drive client: {}", e))?;
            info!("Using drive object storage");
            Ok(Arc::new(client))
        }
        _ => {
            info!("Using in-memory object storage");
            Ok(Arc::new(InMemoryObjects::new()))
        }
    }
}

/// Selects the mail transport.
fn init_mailer(config: &ServerConfig) -> Result<Arc<dyn MailTransport>> {
    match &config.mail.relay_endpoint {
        Some(endpoint) => {
            let mut relay_config = RelayConfig::new(endpoint.clone());
            if let Some(key) = &config.mail.relay_api_key {
                relay_config = relay_config.with_api_key(key.clone());
            }
            let transport = HttpRelayTransport::new(relay_config)
                .map_err(|e| anyhow::anyhow!("Failed to build mail relay: {}", e))?;
            info!(endpoint = %endpoint, "Using HTTP mail relay");
            Ok(Arc::new(transport))
        }
        None => {
            info!("No mail relay configured, outbound mail will be logged and dropped");
            Ok(Arc::new(LogTransport))
        }
    }
}

/// Shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down");
        }
    }
}
