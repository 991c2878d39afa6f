// ABOUTME: Identity model for accounts that can authenticate
// ABOUTME: Holds the stored password digest and the single attached role
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Role;

/// An account capable of authenticating
///
/// `password_hash` is always a digest, never the plaintext. `role` is `None`
/// only when the stored role reference is missing or unknown; the access guard
/// treats such identities as forbidden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable identifier, used as the token subject
    pub id: Uuid,
    /// Unique login email
    pub email: String,
    /// Stored password digest
    pub password_hash: String,
    /// Attached role
    pub role: Option<Role>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Create a new identity with a fresh identifier
    #[must_use]
    pub fn new(email: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            role: Some(role),
            created_at: Utc::now(),
        }
    }

    /// Public view without the password digest
    #[must_use]
    pub fn summary(&self) -> IdentitySummary {
        IdentitySummary {
            id: self.id,
            email: self.email.clone(),
            role_name: self.role.map(Role::as_str).map(ToOwned::to_owned),
            created_at: self.created_at,
        }
    }
}

/// Identity as returned by the user management endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySummary {
    /// Identity id
    pub id: Uuid,
    /// Login email
    pub email: String,
    /// Name of the attached role, if any
    pub role_name: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
