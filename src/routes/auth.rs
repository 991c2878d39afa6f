// ABOUTME: Login, registration, and profile routes backed by the authentication service
// ABOUTME: Failure responses never reveal which of email or password was wrong
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! Authentication routes
//!
//! Login and registration are public. The profile route sits behind the access
//! guard with no role restriction beyond "has a role".

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::json_body;
use crate::auth::{AuthManager, Claims};
use crate::constants::{error_messages, limits};
use crate::crypto::PasswordHasher;
use crate::database::CredentialStore;
use crate::errors::{AppError, AppResult, DatabaseError};
use crate::middleware::{require_roles, AccessGuard, AuthenticatedUser, RequireRoles};
use crate::models::{Identity, Role};
use crate::resources::ServerResources;

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Account email
    pub email: String,
    /// Plaintext password
    pub password: String,
}

/// Successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub access_token: String,
}

/// Self-registration request; body shape matches [`LoginRequest`]
pub type RegisterRequest = LoginRequest;

/// Newly registered identity
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Identity id
    pub id: Uuid,
    /// Stored email
    pub email: String,
}

/// Token claims plus the role resolved for this request
#[derive(Debug, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Verified claims
    #[serde(flatten)]
    pub claims: Claims,
    /// Current role
    pub role: Role,
}

/// Authentication service for sign-in and sign-up
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    auth_manager: Arc<AuthManager>,
    hasher: PasswordHasher,
}

impl AuthService {
    /// Build a service over explicit collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn CredentialStore>,
        auth_manager: Arc<AuthManager>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            store,
            auth_manager,
            hasher,
        }
    }

    /// Build a service from the shared server resources
    #[must_use]
    pub fn from_resources(resources: &ServerResources) -> Self {
        Self::new(
            resources.credential_store.clone(),
            resources.auth_manager.clone(),
            resources.password_hasher.clone(),
        )
    }

    /// Exchange email and password for an access token
    ///
    /// Unknown email and wrong password produce the same error. A legacy
    /// digest that verifies is replaced with an Argon2id hash before returning.
    ///
    /// # Errors
    ///
    /// Returns `InvalidCredential` on any credential mismatch, or a database
    /// error if the store cannot be reached
    pub async fn sign_in(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        // Registration stores the trimmed form
        let email = request.email.trim();
        tracing::info!(email = %email, "Login attempt");

        let Some(identity) = self.store.find_by_email(email).await? else {
            self.hasher.equalize_timing_blocking(request.password).await;
            tracing::info!(outcome = "unknown_email", "Login rejected");
            return Err(AppError::invalid_credential(error_messages::INVALID_CREDENTIALS));
        };

        let verified = self
            .hasher
            .verify_blocking(request.password.clone(), identity.password_hash.clone())
            .await?;
        if !verified {
            tracing::info!(user_id = %identity.id, outcome = "wrong_password", "Login rejected");
            return Err(AppError::invalid_credential(error_messages::INVALID_CREDENTIALS));
        }

        if PasswordHasher::needs_rehash(&identity.password_hash) {
            self.upgrade_legacy_digest(&identity, request.password).await;
        }

        let access_token = self
            .auth_manager
            .generate_token(identity.id, &identity.email)?;

        tracing::info!(user_id = %identity.id, "Login succeeded");
        Ok(LoginResponse { access_token })
    }

    /// Create a new identity with the lowest-privilege role
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email or empty password,
    /// `DuplicateIdentity` if the email is taken, or a database error
    pub async fn sign_up(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let email = request.email.trim().to_owned();
        tracing::info!(email = %email, "Registration attempt");

        Self::validate_credentials(&email, &request.password)?;

        let password_hash = self.hasher.hash_blocking(request.password).await?;
        let identity = Identity::new(email, password_hash, Role::lowest_privilege());

        self.store
            .create(&identity)
            .await
            .map_err(map_duplicate_email)?;

        tracing::info!(user_id = %identity.id, "Identity registered");
        Ok(RegisterResponse {
            id: identity.id,
            email: identity.email,
        })
    }

    /// Check email format and password presence
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` describing the first failing field
    pub fn validate_credentials(email: &str, password: &str) -> AppResult<()> {
        if !Self::is_valid_email(email) {
            return Err(AppError::invalid_input(error_messages::INVALID_EMAIL_FORMAT));
        }
        if password.is_empty() {
            return Err(AppError::invalid_input(error_messages::EMPTY_PASSWORD));
        }
        Ok(())
    }

    /// Validate email format
    #[must_use]
    pub fn is_valid_email(email: &str) -> bool {
        if email.len() > limits::MAX_EMAIL_LENGTH || email.chars().any(char::is_whitespace) {
            return false;
        }
        let Some((local, domain)) = email.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
    }

    /// Replace a legacy digest; failure is logged and does not fail the login
    async fn upgrade_legacy_digest(&self, identity: &Identity, password: String) {
        let upgraded = match self.hasher.hash_blocking(password).await {
            Ok(hash) => hash,
            Err(e) => {
                tracing::warn!(user_id = %identity.id, error = %e, "Legacy digest rehash failed");
                return;
            }
        };

        match self.store.update_password_hash(identity.id, &upgraded).await {
            Ok(()) => tracing::info!(user_id = %identity.id, "Upgraded legacy password digest"),
            Err(e) => {
                tracing::warn!(user_id = %identity.id, error = %e, "Failed to store upgraded digest");
            }
        }
    }
}

/// Map a unique-email violation to `DuplicateIdentity`
pub(crate) fn map_duplicate_email(error: DatabaseError) -> AppError {
    match error {
        DatabaseError::UniqueViolation { .. } => {
            AppError::duplicate_identity(error_messages::EMAIL_IN_USE).with_source(error)
        }
        other => other.into(),
    }
}

/// Authentication routes handler
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        let guard = AccessGuard::new(&resources, RequireRoles::any_role());

        let profile = Router::new()
            .route("/auth/profile", get(Self::handle_profile))
            .route_layer(middleware::from_fn_with_state(guard, require_roles));

        Router::new()
            .route("/auth/login", post(Self::handle_login))
            .route("/auth/register", post(Self::handle_register))
            .with_state(resources)
            .merge(profile)
    }

    /// Handle POST /auth/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<LoginRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        let response = AuthService::from_resources(&resources)
            .sign_in(request)
            .await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /auth/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<RegisterRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let request = json_body(payload)?;
        let response = AuthService::from_resources(&resources)
            .sign_up(request)
            .await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /auth/profile
    async fn handle_profile(Extension(user): Extension<AuthenticatedUser>) -> Json<ProfileResponse> {
        Json(ProfileResponse {
            claims: user.claims,
            role: user.role,
        })
    }
}
