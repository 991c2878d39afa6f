// ABOUTME: Access guard enforcing declared role sets on routes
// ABOUTME: Verifies bearer tokens, re-resolves the caller's role per request, and decides allow/deny
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! # Access Guard
//!
//! Routes declare the roles they accept with a [`RequireRoles`] value attached
//! through [`axum::middleware::from_fn_with_state`]. For each request the guard:
//!
//! 1. allows immediately when no roles are required
//! 2. denies with `MissingCredential` when no `Bearer` token is presented
//! 3. denies with `InvalidCredential` when the token fails verification
//! 4. looks the subject up in the store (never cached, so role changes apply
//!    on the very next request)
//! 5. denies with `ForbiddenAccess` when the identity is gone, has no role, or
//!    holds a role outside the required set
//! 6. otherwise allows and inserts an [`AuthenticatedUser`] into the request
//!    extensions
//!
//! Every step except the lookup lives in [`decide`], a pure function. A store
//! failure during the lookup is a server error, never a denial.
//!
//! ```rust,no_run
//! use axum::{middleware, routing::get, Router};
//! use clubhouse_server::middleware::auth::{require_roles, AccessGuard, RequireRoles};
//! use clubhouse_server::models::Role;
//! use clubhouse_server::resources::ServerResources;
//! use std::sync::Arc;
//!
//! # fn example(resources: &Arc<ServerResources>) -> Router {
//! let guard = AccessGuard::new(resources, RequireRoles::any_of([Role::Admin]));
//! Router::new()
//!     .route("/admin-only", get(|| async { "ok" }))
//!     .route_layer(middleware::from_fn_with_state(guard, require_roles))
//! # }
//! ```

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::auth::{AuthManager, Claims, JwtValidationError};
use crate::constants::error_messages;
use crate::database::CredentialStore;
use crate::errors::AppError;
use crate::models::{Identity, Role};
use crate::resources::ServerResources;

/// Set of roles a route accepts; empty means unrestricted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequireRoles {
    roles: Vec<Role>,
}

impl RequireRoles {
    /// No restriction: every caller is allowed, with or without a token
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self { roles: Vec::new() }
    }

    /// Accept callers holding any of the given roles
    #[must_use]
    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            roles: roles.into_iter().collect(),
        }
    }

    /// Accept any authenticated caller that holds some role
    #[must_use]
    pub fn any_role() -> Self {
        Self::any_of(Role::ALL)
    }

    /// Whether the set is empty
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.roles.is_empty()
    }

    /// Whether `role` is a member of the set
    #[must_use]
    pub fn permits(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// Result of extracting and verifying the presented credential
#[derive(Debug, Clone)]
pub enum TokenOutcome {
    /// No `Authorization: Bearer` header
    Absent,
    /// A token was presented and rejected
    Rejected(JwtValidationError),
    /// A token was presented and verified
    Verified(Claims),
}

/// Caller identity attached to the request after an allow decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Identity id
    pub user_id: Uuid,
    /// Identity email, as currently stored
    pub email: String,
    /// Role resolved for this request
    pub role: Role,
    /// Verified token claims
    pub claims: Claims,
}

/// Why a request was denied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Denial {
    /// No token presented
    MissingCredential,
    /// Token failed verification
    InvalidCredential,
    /// Token subject does not resolve to an identity
    UnknownIdentity,
    /// Identity exists but holds no role
    IdentityWithoutRole,
    /// Identity's role is outside the required set
    RoleNotPermitted(Role),
}

impl Denial {
    /// Stable label for structured logs
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::InvalidCredential => "invalid_credential",
            Self::UnknownIdentity => "unknown_identity",
            Self::IdentityWithoutRole => "identity_without_role",
            Self::RoleNotPermitted(_) => "role_not_permitted",
        }
    }

    /// Client-facing error; the three forbidden cases are indistinguishable
    #[must_use]
    pub fn into_error(self) -> AppError {
        match self {
            Self::MissingCredential => {
                AppError::missing_credential(error_messages::MISSING_CREDENTIALS)
            }
            Self::InvalidCredential => AppError::invalid_credential(error_messages::INVALID_TOKEN),
            Self::UnknownIdentity | Self::IdentityWithoutRole | Self::RoleNotPermitted(_) => {
                AppError::forbidden(error_messages::ACCESS_DENIED)
            }
        }
    }
}

/// Per-request authorization decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Route is unrestricted
    AllowUnrestricted,
    /// Caller holds a permitted role
    Allow(AuthenticatedUser),
    /// Request is denied
    Deny(Denial),
}

/// Decide a request from its inputs alone
///
/// `identity` is the store lookup for the verified subject; it is ignored
/// unless `token` is [`TokenOutcome::Verified`].
#[must_use]
pub fn decide(
    required: &RequireRoles,
    token: TokenOutcome,
    identity: Option<&Identity>,
) -> Decision {
    if required.is_unrestricted() {
        return Decision::AllowUnrestricted;
    }

    let claims = match token {
        TokenOutcome::Absent => return Decision::Deny(Denial::MissingCredential),
        TokenOutcome::Rejected(_) => return Decision::Deny(Denial::InvalidCredential),
        TokenOutcome::Verified(claims) => claims,
    };

    let Some(identity) = identity else {
        return Decision::Deny(Denial::UnknownIdentity);
    };

    let Some(role) = identity.role else {
        return Decision::Deny(Denial::IdentityWithoutRole);
    };

    if !required.permits(role) {
        return Decision::Deny(Denial::RoleNotPermitted(role));
    }

    Decision::Allow(AuthenticatedUser {
        user_id: identity.id,
        email: identity.email.clone(),
        role,
        claims,
    })
}

/// Extract the token from `Authorization: Bearer <token>`
#[must_use]
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// State for [`require_roles`]: the collaborators plus the declared role set
#[derive(Clone)]
pub struct AccessGuard {
    auth_manager: Arc<AuthManager>,
    store: Arc<dyn CredentialStore>,
    required: RequireRoles,
}

impl AccessGuard {
    /// Guard using the server's shared collaborators
    #[must_use]
    pub fn new(resources: &Arc<ServerResources>, required: RequireRoles) -> Self {
        Self::with_store(
            resources.auth_manager.clone(),
            resources.credential_store.clone(),
            required,
        )
    }

    /// Guard over explicit collaborators
    #[must_use]
    pub fn with_store(
        auth_manager: Arc<AuthManager>,
        store: Arc<dyn CredentialStore>,
        required: RequireRoles,
    ) -> Self {
        Self {
            auth_manager,
            store,
            required,
        }
    }

    /// Verify the presented token and resolve its subject
    ///
    /// # Errors
    ///
    /// Returns an error only when the store lookup fails
    async fn authorize(&self, headers: &HeaderMap) -> Result<Decision, AppError> {
        if self.required.is_unrestricted() {
            return Ok(Decision::AllowUnrestricted);
        }

        let token = match bearer_token(headers) {
            None => TokenOutcome::Absent,
            Some(raw) => match self.auth_manager.validate_token_detailed(raw) {
                Ok(claims) => TokenOutcome::Verified(claims),
                Err(e) => {
                    tracing::debug!(reason = e.kind(), "Token rejected: {}", e);
                    TokenOutcome::Rejected(e)
                }
            },
        };

        let identity = match &token {
            TokenOutcome::Verified(claims) => match claims.subject_id() {
                Some(user_id) => self.store.find_by_id(user_id).await.map_err(|e| {
                    AppError::database(format!("Role lookup failed: {e}")).with_source(e)
                })?,
                None => None,
            },
            TokenOutcome::Absent | TokenOutcome::Rejected(_) => None,
        };

        Ok(decide(&self.required, token, identity.as_ref()))
    }
}

impl AccessGuard {
    /// Decide, log, and either forward the request or answer with the denial
    async fn enforce(self, mut req: Request, next: Next) -> Response {
        let span = tracing::Span::current();
        let decision = match self.authorize(req.headers()).await {
            Ok(decision) => decision,
            Err(e) => {
                span.record("outcome", "store_error");
                return e.into_response();
            }
        };

        match decision {
            Decision::AllowUnrestricted => {
                span.record("outcome", "unrestricted");
                next.run(req).await
            }
            Decision::Allow(user) => {
                span.record("outcome", "allowed")
                    .record("user_id", user.user_id.to_string())
                    .record("role", user.role.as_str());
                tracing::debug!("Access granted");
                req.extensions_mut().insert(user);
                next.run(req).await
            }
            Decision::Deny(denial) => {
                span.record("outcome", denial.outcome());
                if let Denial::RoleNotPermitted(role) = &denial {
                    span.record("role", role.as_str());
                }
                tracing::warn!("Access denied");
                denial.into_error().into_response()
            }
        }
    }
}

/// Middleware enforcing an [`AccessGuard`]'s role set
pub async fn require_roles(
    State(guard): State<AccessGuard>,
    req: Request,
    next: Next,
) -> Response {
    let span = tracing::info_span!(
        "access_guard",
        method = %req.method(),
        path = %req.uri().path(),
        user_id = tracing::field::Empty,
        role = tracing::field::Empty,
        outcome = tracing::field::Empty,
    );
    guard.enforce(req, next).instrument(span).await
}
