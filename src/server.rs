// ABOUTME: Router assembly and HTTP server lifecycle
// ABOUTME: Wires shared resources, middleware layers, and graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! # HTTP Server
//!
//! [`build_router`] produces the complete application so tests can drive it
//! with `tower::ServiceExt::oneshot`; [`run`] binds it to a socket.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{http::StatusCode, middleware, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::info;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database::Database;
use crate::middleware::{request_id_middleware, setup_cors};
use crate::resources::ServerResources;
use crate::routes;

/// Build the application router with every middleware layer applied
pub fn build_router(resources: &Arc<ServerResources>, config: &ServerConfig) -> Router {
    routes::api_routes(resources)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.request_timeout_secs),
        ))
        .layer(setup_cors(&config.cors))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

/// Construct shared resources from configuration
///
/// # Errors
///
/// Returns an error if the database cannot be opened or migrated
pub async fn bootstrap(config: &ServerConfig) -> Result<Arc<ServerResources>> {
    let database = Database::new(&config.database.url, config.database.max_connections)
        .await
        .with_context(|| format!("Failed to open database {}", config.database.url))?;
    info!(database = %config.database.url, "Database initialized");

    let auth_manager = AuthManager::new(
        config.auth.jwt_secret.as_bytes(),
        config.auth.jwt_expiry_hours,
    );
    info!(
        expiry_hours = auth_manager.token_expiry_hours(),
        "Authentication manager initialized"
    );

    Ok(Arc::new(ServerResources::new(database, auth_manager)))
}

/// Run the server until interrupted
///
/// # Errors
///
/// Returns an error if configuration is invalid, startup fails, or the
/// listener cannot be bound
pub async fn run(config: ServerConfig) -> Result<()> {
    config.validate()?;
    info!("{}", config.summary());

    let resources = bootstrap(&config).await?;
    let app = build_router(&resources, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, config.http_port))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(%addr, "Clubhouse server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Clubhouse server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
