// ABOUTME: Database error types for the credential store and resource tables
// ABOUTME: Separates not-found and uniqueness signals from transport failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

/// Errors raised by store operations
///
/// A missing row on a point lookup is not an error: lookups return `Ok(None)`.
/// `NotFound` is reserved for mutations that target a row that does not exist.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Mutation targeted a row that does not exist
    #[error("{entity} '{id}' not found")]
    NotFound {
        /// Table or entity name
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// Unique constraint violated
    #[error("Unique constraint violated on {field}")]
    UniqueViolation {
        /// Column carrying the constraint, as reported by the driver
        field: String,
    },

    /// Foreign key or reference data does not exist
    #[error("Invalid reference: {reference}")]
    InvalidReference {
        /// Description of the dangling reference
        reference: String,
    },

    /// Stored data could not be decoded
    #[error("Invalid stored data in {context}: {reason}")]
    InvalidData {
        /// Where decoding failed
        context: &'static str,
        /// What was wrong
        reason: String,
    },

    /// Connection or pool failure
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Schema migration failed
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Any other driver error
    #[cfg(feature = "database-errors")]
    #[error("Database query failed")]
    Sqlx {
        /// Underlying driver error
        #[source]
        source: sqlx::Error,
    },
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::Connection(error.to_string())
            }
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                // SQLite reports "UNIQUE constraint failed: users.email"
                let field = db_err
                    .message()
                    .rsplit(": ")
                    .next()
                    .unwrap_or_default()
                    .to_owned();
                Self::UniqueViolation { field }
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                Self::InvalidReference {
                    reference: db_err.message().to_owned(),
                }
            }
            other => Self::Sqlx { source: other },
        }
    }
}
