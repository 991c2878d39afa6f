// ABOUTME: SQLite database management and the credential store contract
// ABOUTME: Owns the pool, runs schema migrations, and seeds the fixed role set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

//! # Database Management
//!
//! The [`Database`] owns a `SQLite` pool and implements [`CredentialStore`], the
//! narrow contract the authentication path depends on. Point lookups return
//! `Ok(None)` for a missing row so callers can tell "not found" apart from a
//! transport failure.

mod employees;
mod trainings;
mod users;

pub use users::IdentityChanges;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use uuid::Uuid;

use crate::config::DatabaseUrl;
use crate::errors::DatabaseError;
use crate::models::{Identity, Role};

/// Result alias for store operations
pub type DbResult<T> = Result<T, DatabaseError>;

/// Persistence contract consumed by login, registration, and the access guard
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an identity by email (case-insensitive)
    async fn find_by_email(&self, email: &str) -> DbResult<Option<Identity>>;

    /// Look up an identity by id, resolving its current role
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<Identity>>;

    /// Insert a new identity
    ///
    /// Fails with [`DatabaseError::UniqueViolation`] when the email is taken;
    /// nothing is written in that case.
    async fn create(&self, identity: &Identity) -> DbResult<()>;

    /// Replace the stored password digest
    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> DbResult<()>;
}

/// Database manager for identities, employees, and trainings
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Connect and run migrations
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the database directory cannot be
    /// created, the connection fails, or a migration fails
    pub async fn new(url: &DatabaseUrl, max_connections: u32) -> DbResult<Self> {
        if let DatabaseUrl::SQLite { path } = url {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| {
                    DatabaseError::Connection(format!(
                        "Cannot create database directory {}: {e}",
                        parent.display()
                    ))
                })?;
            }
        }

        let options = SqliteConnectOptions::from_str(&url.to_connection_string())?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every in-memory connection is its own database, so pin the pool to one
        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Check that the store answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip fails
    pub async fn ping(&self) -> DbResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::Migration`] if any statement fails
    pub async fn migrate(&self) -> DbResult<()> {
        self.migrate_roles()
            .await
            .map_err(|e| DatabaseError::Migration(format!("roles: {e}")))?;
        self.migrate_users()
            .await
            .map_err(|e| DatabaseError::Migration(format!("users: {e}")))?;
        self.migrate_employees()
            .await
            .map_err(|e| DatabaseError::Migration(format!("employees: {e}")))?;
        self.migrate_trainings()
            .await
            .map_err(|e| DatabaseError::Migration(format!("trainings: {e}")))?;
        Ok(())
    }

    /// Create the roles table and seed the fixed role set
    async fn migrate_roles(&self) -> DbResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS roles (
                id INTEGER PRIMARY KEY,
                name TEXT UNIQUE NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        for role in Role::ALL {
            sqlx::query("INSERT OR IGNORE INTO roles (id, name) VALUES ($1, $2)")
                .bind(role.id())
                .bind(role.as_str())
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl CredentialStore for Database {
    async fn find_by_email(&self, email: &str) -> DbResult<Option<Identity>> {
        self.get_identity_by_email(email).await
    }

    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<Identity>> {
        self.get_identity(id).await
    }

    async fn create(&self, identity: &Identity) -> DbResult<()> {
        self.create_identity(identity).await
    }

    async fn update_password_hash(&self, id: Uuid, password_hash: &str) -> DbResult<()> {
        self.set_password_hash(id, password_hash).await
    }
}

/// Parse a UUID stored as TEXT
pub(crate) fn parse_stored_uuid(context: &'static str, value: &str) -> DbResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| DatabaseError::InvalidData {
        context,
        reason: e.to_string(),
    })
}
