// ABOUTME: Training schedule routes readable by every role
// ABOUTME: Only administrators, managers, and coaches may change the schedule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! Training routes
//!
//! Reads and writes sit in two route groups with different guards. Both groups
//! share paths, so they are merged per method.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Json, Router,
};

use super::{json_body, parse_path_id};
use crate::errors::AppError;
use crate::middleware::{require_roles, AccessGuard, RequireRoles};
use crate::models::{NewTraining, Role, TrainingUpdate};
use crate::resources::ServerResources;

/// Training routes handler
pub struct TrainingRoutes;

impl TrainingRoutes {
    /// Roles allowed to change the schedule
    pub const WRITERS: [Role; 3] = [Role::Admin, Role::Manager, Role::Coach];

    /// Create all training routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let read_guard = AccessGuard::new(&resources, RequireRoles::any_role());
        let write_guard = AccessGuard::new(&resources, RequireRoles::any_of(Self::WRITERS));

        let reads = Router::new()
            .route("/trainings", get(Self::handle_list))
            .route("/trainings/:id", get(Self::handle_get))
            .route_layer(middleware::from_fn_with_state(read_guard, require_roles))
            .with_state(resources.clone());

        let writes = Router::new()
            .route("/trainings", post(Self::handle_create))
            .route(
                "/trainings/:id",
                patch(Self::handle_update).delete(Self::handle_delete),
            )
            .route_layer(middleware::from_fn_with_state(write_guard, require_roles))
            .with_state(resources);

        reads.merge(writes)
    }

    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let trainings = resources.database.list_trainings().await?;
        Ok((StatusCode::OK, Json(trainings)).into_response())
    }

    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id: i64 = parse_path_id(&id, "training")?;
        let training = resources
            .database
            .get_training(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Training {id}")))?;
        Ok((StatusCode::OK, Json(training)).into_response())
    }

    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<NewTraining>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = json_body(payload)?;
        body.validate()?;

        let training = resources.database.create_training(&body).await?;
        tracing::info!(training_id = training.id, "Training scheduled");
        Ok((StatusCode::CREATED, Json(training)).into_response())
    }

    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        payload: Result<Json<TrainingUpdate>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id: i64 = parse_path_id(&id, "training")?;
        let body = json_body(payload)?;
        body.validate()?;

        let training = resources.database.update_training(id, body).await?;
        tracing::info!(training_id = id, "Training updated");
        Ok((StatusCode::OK, Json(training)).into_response())
    }

    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id: i64 = parse_path_id(&id, "training")?;
        resources.database.delete_training(id).await?;
        tracing::info!(training_id = id, "Training cancelled");
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
