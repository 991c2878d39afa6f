// ABOUTME: Administrator routes for listing, creating, updating, and deleting identities
// ABOUTME: Passwords are hashed before storage and never returned in responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! Identity management routes (Admin only)

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::auth::{map_duplicate_email, AuthService};
use super::{json_body, parse_path_id};
use crate::constants::{error_messages, limits};
use crate::database::IdentityChanges;
use crate::errors::{AppError, AppResult};
use crate::middleware::{require_roles, AccessGuard, RequireRoles};
use crate::models::{Identity, IdentitySummary, Role};
use crate::resources::ServerResources;

/// Pagination for GET /users
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListUsersQuery {
    /// Rows to skip
    pub skip: Option<i64>,
    /// Rows to return, capped at the maximum page size
    pub take: Option<i64>,
}

impl ListUsersQuery {
    /// Resolve defaults and bounds into `(skip, take)`
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either value is negative
    pub fn resolve(self) -> AppResult<(i64, i64)> {
        let skip = self.skip.unwrap_or(0);
        let take = self.take.unwrap_or(limits::DEFAULT_PAGE_SIZE);
        if skip < 0 || take < 0 {
            return Err(AppError::invalid_input("skip and take must be non-negative"));
        }
        Ok((skip, take.min(limits::MAX_PAGE_SIZE)))
    }
}

/// Page of identities
#[derive(Debug, Serialize, Deserialize)]
pub struct UserListResponse {
    /// Identities on this page
    pub users: Vec<IdentitySummary>,
    /// Total identities stored
    pub total: i64,
    /// Applied offset
    pub skip: i64,
    /// Applied page size
    pub take: i64,
}

/// Body for POST /users
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// Login email
    pub email: String,
    /// Plaintext password
    pub password: String,
    /// Role name, case-insensitive
    pub role_name: String,
}

/// Body for PATCH /users/:id
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    /// New email
    pub email: Option<String>,
    /// New plaintext password
    pub password: Option<String>,
    /// New role name
    pub role_name: Option<String>,
}

/// Identity management routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all identity management routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let guard = AccessGuard::new(&resources, RequireRoles::any_of([Role::Admin]));

        Router::new()
            .route("/users", get(Self::handle_list).post(Self::handle_create))
            .route(
                "/users/:id",
                patch(Self::handle_update).delete(Self::handle_delete),
            )
            .route_layer(middleware::from_fn_with_state(guard, require_roles))
            .with_state(resources)
    }

    /// Handle GET /users
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        query: Result<Query<ListUsersQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let Query(query) = query.map_err(|e| AppError::invalid_input(e.body_text()))?;
        let (skip, take) = query.resolve()?;

        let identities = resources.database.list_identities(skip, take).await?;
        let total = resources.database.count_identities().await?;

        let response = UserListResponse {
            users: identities.iter().map(Identity::summary).collect(),
            total,
            skip,
            take,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /users
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<CreateUserRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = json_body(payload)?;
        let email = body.email.trim().to_owned();
        AuthService::validate_credentials(&email, &body.password)?;
        let role: Role = body.role_name.parse()?;

        let password_hash = resources.password_hasher.hash_blocking(body.password).await?;
        let identity = Identity::new(email, password_hash, role);

        resources
            .database
            .create_identity(&identity)
            .await
            .map_err(map_duplicate_email)?;

        tracing::info!(user_id = %identity.id, role = %role, "Identity created by admin");
        Ok((StatusCode::CREATED, Json(identity.summary())).into_response())
    }

    /// Handle PATCH /users/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
        payload: Result<Json<UpdateUserRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let id: Uuid = parse_path_id(&id, "user")?;
        let body = json_body(payload)?;
        let changes = Self::resolve_changes(&resources, body).await?;

        let identity = resources
            .database
            .update_identity(id, changes)
            .await
            .map_err(map_duplicate_email)?;

        tracing::info!(user_id = %id, "Identity updated by admin");
        Ok((StatusCode::OK, Json(identity.summary())).into_response())
    }

    /// Handle DELETE /users/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let id: Uuid = parse_path_id(&id, "user")?;
        resources.database.delete_identity(id).await?;

        tracing::info!(user_id = %id, "Identity deleted by admin");
        Ok(StatusCode::NO_CONTENT.into_response())
    }

    /// Validate provided fields and hash a new password
    async fn resolve_changes(
        resources: &ServerResources,
        body: UpdateUserRequest,
    ) -> AppResult<IdentityChanges> {
        let email = body.email.map(|email| email.trim().to_owned());
        if let Some(email) = &email {
            if !AuthService::is_valid_email(email) {
                return Err(AppError::invalid_input(error_messages::INVALID_EMAIL_FORMAT));
            }
        }

        let role = body.role_name.as_deref().map(str::parse::<Role>).transpose()?;

        let password_hash = match body.password {
            Some(password) if password.is_empty() => {
                return Err(AppError::invalid_input(error_messages::EMPTY_PASSWORD));
            }
            Some(password) => Some(resources.password_hasher.hash_blocking(password).await?),
            None => None,
        };

        Ok(IdentityChanges {
            email,
            password_hash,
            role,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        assert_eq!(
            ListUsersQuery::default().resolve().unwrap(),
            (0, limits::DEFAULT_PAGE_SIZE)
        );
    }

    #[test]
    fn test_take_is_capped() {
        let query = ListUsersQuery {
            skip: Some(5),
            take: Some(limits::MAX_PAGE_SIZE + 1),
        };
        assert_eq!(query.resolve().unwrap(), (5, limits::MAX_PAGE_SIZE));
    }

    #[test]
    fn test_negative_paging_rejected() {
        let query = ListUsersQuery {
            skip: Some(-1),
            take: None,
        };
        assert_eq!(query.resolve().unwrap_err().http_status(), 400);
    }
}
