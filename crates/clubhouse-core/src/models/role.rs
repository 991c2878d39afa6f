// ABOUTME: Role enumeration for the single-role authorization model
// ABOUTME: Maps the fixed role set to its seeded identifiers and display names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::AppError;

/// Privilege tier attached to exactly one identity
///
/// The set is fixed reference data. Identifiers match the rows seeded into the
/// `roles` table and never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Supporter account, lowest privilege
    Fan,
    /// Full administrative access
    Admin,
    /// Manages staff and schedules
    Manager,
    /// Squad member
    Player,
    /// Runs training sessions
    Coach,
}

impl Role {
    /// Every role, in identifier order
    pub const ALL: [Self; 5] = [
        Self::Fan,
        Self::Admin,
        Self::Manager,
        Self::Player,
        Self::Coach,
    ];

    /// Role assigned to self-registered identities
    #[must_use]
    pub const fn lowest_privilege() -> Self {
        Self::Fan
    }

    /// Seeded row identifier
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Fan => 1,
            Self::Admin => 2,
            Self::Manager => 3,
            Self::Player => 4,
            Self::Coach => 5,
        }
    }

    /// Look up a role by its seeded row identifier
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Fan),
            2 => Some(Self::Admin),
            3 => Some(Self::Manager),
            4 => Some(Self::Player),
            5 => Some(Self::Coach),
            _ => None,
        }
    }

    /// Stored and displayed role name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fan => "Fan",
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Player => "Player",
            Self::Coach => "Coach",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::invalid_input(format!("Unknown role: {s}")))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_id(role.id()), Some(role));
        }
        assert_eq!(Role::from_id(0), None);
        assert_eq!(Role::from_id(6), None);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(" Coach ".parse::<Role>().unwrap(), Role::Coach);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_lowest_privilege_is_fan() {
        assert_eq!(Role::lowest_privilege(), Role::Fan);
    }
}
