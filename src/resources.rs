// ABOUTME: Shared server resources built once at startup and handed to every route
// ABOUTME: Bundles the database, credential store, token issuer, and password hasher
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! # Server Resources
//!
//! Everything here is constructed once and shared behind `Arc`s, so route
//! handlers clone pointers instead of rebuilding expensive state per request.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::crypto::PasswordHasher;
use crate::database::{CredentialStore, Database};

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Concrete store for admin CRUD surfaces
    pub database: Arc<Database>,
    /// Narrow contract used by login, registration, and the access guard
    pub credential_store: Arc<dyn CredentialStore>,
    /// Token issuer and verifier
    pub auth_manager: Arc<AuthManager>,
    /// Password hasher
    pub password_hasher: PasswordHasher,
}

impl ServerResources {
    /// Create resources backed by one database
    #[must_use]
    pub fn new(database: Database, auth_manager: AuthManager) -> Self {
        let database = Arc::new(database);
        let credential_store: Arc<dyn CredentialStore> = database.clone();

        Self {
            database,
            credential_store,
            auth_manager: Arc::new(auth_manager),
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Replace the credential store used by the authentication path
    #[must_use]
    pub fn with_credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credential_store = store;
        self
    }
}
