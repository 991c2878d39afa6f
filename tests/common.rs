// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory resources, identity seeding, and request helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `clubhouse_server`

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use clubhouse_server::{
    auth::{generate_jwt_secret, AuthManager},
    config::{
        AuthConfig, CorsConfig, DatabaseConfig, DatabaseUrl, Environment, JwtSecret, ServerConfig,
    },
    database::Database,
    models::{Identity, Role},
    resources::ServerResources,
    server::build_router,
};
use serde_json::Value;
use std::sync::{Arc, Once};
use tower::ServiceExt;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new(&DatabaseUrl::Memory, 1).await?)
}

/// Create test authentication manager
pub fn create_test_auth_manager() -> AuthManager {
    AuthManager::new(&generate_jwt_secret(), 24)
}

/// Resources over a fresh in-memory database
pub async fn create_test_resources() -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        create_test_auth_manager(),
    )))
}

/// Configuration suitable for building the router in tests
pub fn test_config() -> ServerConfig {
    ServerConfig {
        http_port: 0,
        host: "127.0.0.1".to_owned(),
        environment: Environment::Testing,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: JwtSecret::generate(),
            jwt_expiry_hours: 24,
        },
        cors: CorsConfig {
            allowed_origins: "*".to_owned(),
        },
        request_timeout_secs: 30,
    }
}

/// Full application router with every layer
pub fn test_app(resources: &Arc<ServerResources>) -> Router {
    build_router(resources, &test_config())
}

/// Insert an identity with the given role and password
pub async fn create_identity_with_role(
    resources: &ServerResources,
    email: &str,
    password: &str,
    role: Role,
) -> Result<Identity> {
    let hash = resources.password_hasher.hash(password)?;
    let identity = Identity::new(email.to_owned(), hash, role);
    resources.database.create_identity(&identity).await?;
    Ok(identity)
}

/// Issue a token for an identity
pub fn token_for(resources: &ServerResources, identity: &Identity) -> String {
    resources
        .auth_manager
        .generate_token(identity.id, &identity.email)
        .unwrap()
}

/// Seed an identity with a role and return it with a valid token
pub async fn signed_in_as(
    resources: &ServerResources,
    email: &str,
    role: Role,
) -> Result<(Identity, String)> {
    let identity = create_identity_with_role(resources, email, "pw-for-tests", role).await?;
    let token = token_for(resources, &identity);
    Ok((identity, token))
}

/// Build a request with an optional bearer token and optional JSON body
pub fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send a request and decode the JSON body (`Null` when empty)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}
