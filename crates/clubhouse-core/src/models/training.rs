// ABOUTME: Training session model with create and partial-update payloads
// ABOUTME: A session may reference the coaching employee by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::employee::require_text;
use crate::errors::{AppError, AppResult};

/// Scheduled training session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    /// Row id
    pub id: i64,
    /// Short title
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Start time
    pub training_date: DateTime<Utc>,
    /// Venue
    pub location: String,
    /// Length in minutes
    pub duration: Option<i32>,
    /// Coaching employee
    pub coach_id: Option<i64>,
}

/// Payload for scheduling a session
#[derive(Debug, Clone, Deserialize)]
pub struct NewTraining {
    /// Short title
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// Start time (RFC 3339)
    pub training_date: DateTime<Utc>,
    /// Venue
    pub location: String,
    /// Length in minutes
    pub duration: Option<i32>,
    /// Coaching employee
    pub coach_id: Option<i64>,
}

impl NewTraining {
    /// Check required fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank title or location, or a non-positive duration
    pub fn validate(&self) -> AppResult<()> {
        require_text("title", &self.title)?;
        require_text("location", &self.location)?;
        check_duration(self.duration)
    }
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrainingUpdate {
    /// Short title
    pub title: Option<String>,
    /// Free-form description
    pub description: Option<String>,
    /// Start time
    pub training_date: Option<DateTime<Utc>>,
    /// Venue
    pub location: Option<String>,
    /// Length in minutes
    pub duration: Option<i32>,
    /// Coaching employee
    pub coach_id: Option<i64>,
}

impl TrainingUpdate {
    /// Check provided fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank title or location, or a non-positive duration
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(location) = &self.location {
            require_text("location", location)?;
        }
        check_duration(self.duration)
    }
}

fn check_duration(duration: Option<i32>) -> AppResult<()> {
    match duration {
        Some(minutes) if minutes <= 0 => Err(AppError::invalid_input(
            "duration must be a positive number of minutes",
        )),
        _ => Ok(()),
    }
}
