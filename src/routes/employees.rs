// ABOUTME: Employee management routes for administrators and managers
// ABOUTME: Standard list/get/create/update/delete over the employees table
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use super::{json_body, parse_path_id};
use crate::errors::AppError;
use crate::middleware::{require_roles, AccessGuard, RequireRoles};
use crate::models::{EmployeeUpdate, NewEmployee, Role};
use crate::resources::ServerResources;

/// Employee routes handler
pub struct EmployeeRoutes;

impl EmployeeRoutes {
    /// Roles allowed to manage staff records
    pub const ALLOWED: [Role; 2] = [Role::Admin, Role::Manager];

    /// Create all employee routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let guard = AccessGuard::new(&resources, RequireRoles::any_of(Self::ALLOWED));

        Router::new()
            .route("/employees", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/employees/:id",
                get(Self::handle_get)
                    .patch(Self::handle_update)
                    .delete(Self::handle_delete),
            )
            .route_layer(middleware::from_fn_with_state(guard, require_roles))
            .with_state(resources)
    }

    /// Handle GET /employees
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let employees = resources.database.list_employees().await?;
        Ok((StatusCode::OK, Json(employees)).into_response())
    }

    /// Handle GET /employees/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id: i64 = parse_path_id(&id, "employee")?;
        let employee = resources
            .database
            .get_employee(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {id}")))?;
        Ok((StatusCode::OK, Json(employee)).into_response())
    }

    /// Handle POST /employees
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<NewEmployee>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = json_body(payload)?;
        body.validate()?;

        let employee = resources.database.create_employee(&body).await?;
        tracing::info!(employee_id = employee.id, "Employee created");
        Ok((StatusCode::CREATED, Json(employee)).into_response())
    }

    /// Handle PATCH /employees/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        payload: Result<Json<EmployeeUpdate>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id: i64 = parse_path_id(&id, "employee")?;
        let body = json_body(payload)?;
        body.validate()?;

        let employee = resources.database.update_employee(id, body).await?;
        tracing::info!(employee_id = id, "Employee updated");
        Ok((StatusCode::OK, Json(employee)).into_response())
    }

    /// Handle DELETE /employees/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id: i64 = parse_path_id(&id, "employee")?;
        resources.database.delete_employee(id).await?;
        tracing::info!(employee_id = id, "Employee deleted");
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
