// ABOUTME: Identity storage: lookups with role resolution, creation, updates, deletion
// ABOUTME: Deleting an identity detaches dependent employee rows in the same transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{parse_stored_uuid, Database, DbResult};
use crate::errors::DatabaseError;
use crate::models::{Identity, Role};

/// Columns selected for every identity read; the role id comes from the join
const IDENTITY_COLUMNS: &str =
    "u.id, u.email, u.password_hash, u.created_at, r.id AS role_id";

/// Partial update applied by administrators
#[derive(Debug, Clone, Default)]
pub struct IdentityChanges {
    /// New email
    pub email: Option<String>,
    /// New password digest (already hashed)
    pub password_hash: Option<String>,
    /// New role
    pub role: Option<Role>,
}

impl Database {
    /// Create the users table
    pub(super) async fn migrate_users(&self) -> DbResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                password_hash TEXT NOT NULL,
                role_id INTEGER REFERENCES roles(id),
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_users_role_id ON users(role_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert an identity
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::UniqueViolation`] if the email is taken
    pub async fn create_identity(&self, identity: &Identity) -> DbResult<()> {
        sqlx::query(
            r"
            INSERT INTO users (id, email, password_hash, role_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(identity.id.to_string())
        .bind(&identity.email)
        .bind(&identity.password_hash)
        .bind(identity.role.map(Role::id))
        .bind(identity.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get an identity by id with its current role
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_identity(&self, id: Uuid) -> DbResult<Option<Identity>> {
        let query = format!(
            "SELECT {IDENTITY_COLUMNS} FROM users u LEFT JOIN roles r ON r.id = u.role_id WHERE u.id = $1"
        );
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_identity).transpose()
    }

    /// Get an identity by email (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_identity_by_email(&self, email: &str) -> DbResult<Option<Identity>> {
        let query = format!(
            "SELECT {IDENTITY_COLUMNS} FROM users u LEFT JOIN roles r ON r.id = u.role_id WHERE u.email = $1"
        );
        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_identity).transpose()
    }

    /// List identities in creation order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_identities(&self, skip: i64, take: i64) -> DbResult<Vec<Identity>> {
        let query = format!(
            "SELECT {IDENTITY_COLUMNS} FROM users u LEFT JOIN roles r ON r.id = u.role_id \
             ORDER BY u.created_at ASC, u.id ASC LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query(&query)
            .bind(take)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(row_to_identity).collect()
    }

    /// Count all identities
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_identities(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Apply a partial update and return the stored result
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no identity has this id, or
    /// [`DatabaseError::UniqueViolation`] if the new email is taken
    pub async fn update_identity(&self, id: Uuid, changes: IdentityChanges) -> DbResult<Identity> {
        let result = sqlx::query(
            r"
            UPDATE users SET
                email = COALESCE($1, email),
                password_hash = COALESCE($2, password_hash),
                role_id = COALESCE($3, role_id)
            WHERE id = $4
            ",
        )
        .bind(changes.email)
        .bind(changes.password_hash)
        .bind(changes.role.map(Role::id))
        .bind(id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        self.get_identity(id).await?.ok_or_else(|| not_found(id))
    }

    /// Replace the stored password digest
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no identity has this id
    pub async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> DbResult<()> {
        let result = sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(password_hash)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }

    /// Delete an identity, detaching employees that reference it
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if no identity has this id; nothing is
    /// changed in that case
    pub async fn delete_identity(&self, id: Uuid) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE employees SET user_id = NULL WHERE user_id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(not_found(id));
        }

        tx.commit().await?;
        Ok(())
    }
}

fn not_found(id: Uuid) -> DatabaseError {
    DatabaseError::NotFound {
        entity: "user",
        id: id.to_string(),
    }
}

fn row_to_identity(row: &SqliteRow) -> DbResult<Identity> {
    let id: String = row.try_get("id")?;
    let role_id: Option<i64> = row.try_get("role_id")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;

    Ok(Identity {
        id: parse_stored_uuid("users.id", &id)?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        role: role_id.and_then(Role::from_id),
        created_at,
    })
}
