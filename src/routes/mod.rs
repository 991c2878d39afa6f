// ABOUTME: Route module organization for the Clubhouse HTTP endpoints
// ABOUTME: Groups routes by domain and provides shared request-decoding helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! Route module for the Clubhouse server
//!
//! Each domain module contains route definitions and thin handlers. Access
//! requirements are attached per route group with the access guard; handlers
//! behind a guard can rely on an [`AuthenticatedUser`](crate::middleware::AuthenticatedUser)
//! being present in request extensions.

/// Login, registration, and profile routes
pub mod auth;
/// Employee management routes
pub mod employees;
/// Health and readiness routes
pub mod health;
/// Training schedule routes
pub mod trainings;
/// Identity management routes
pub mod users;

pub use auth::{
    AuthRoutes, AuthService, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
pub use employees::EmployeeRoutes;
pub use health::HealthRoutes;
pub use trainings::TrainingRoutes;
pub use users::UserRoutes;

use std::str::FromStr;
use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, Json, Router};

use crate::errors::{AppError, AppResult};
use crate::resources::ServerResources;

/// Merge every domain router
pub fn api_routes(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(UserRoutes::routes(resources.clone()))
        .merge(EmployeeRoutes::routes(resources.clone()))
        .merge(TrainingRoutes::routes(resources.clone()))
}

/// Unwrap a JSON body, reporting decode failures in the standard error shape
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::invalid_input(rejection.body_text()))
}

/// Parse a path segment as an id
pub(crate) fn parse_path_id<T: FromStr>(raw: &str, resource: &str) -> AppResult<T> {
    raw.parse()
        .map_err(|_| AppError::invalid_input(format!("Invalid {resource} id: {raw}")))
}
