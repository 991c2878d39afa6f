// ABOUTME: Employee records managed by admins and managers
// ABOUTME: Includes create and partial-update payloads with field validation

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Club staff member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Row id
    pub id: i64,
    /// Family name
    pub surname: String,
    /// Given name
    pub name: String,
    /// Optional patronymic
    pub patronymic: Option<String>,
    /// Date of birth
    pub birthdate: NaiveDate,
    /// Position reference
    pub position_id: i64,
    /// Linked login account, detached when that account is deleted
    pub user_id: Option<Uuid>,
}

/// Payload for creating an employee
#[derive(Debug, Clone, Deserialize)]
pub struct NewEmployee {
    /// Family name
    pub surname: String,
    /// Given name
    pub name: String,
    /// Optional patronymic
    pub patronymic: Option<String>,
    /// Date of birth (`YYYY-MM-DD`)
    pub birthdate: NaiveDate,
    /// Position reference
    pub position_id: i64,
    /// Linked login account
    pub user_id: Option<Uuid>,
}

impl NewEmployee {
    /// Check required text fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `surname` or `name` is blank
    pub fn validate(&self) -> AppResult<()> {
        require_text("surname", &self.surname)?;
        require_text("name", &self.name)
    }
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeUpdate {
    /// Family name
    pub surname: Option<String>,
    /// Given name
    pub name: Option<String>,
    /// Patronymic
    pub patronymic: Option<String>,
    /// Date of birth
    pub birthdate: Option<NaiveDate>,
    /// Position reference
    pub position_id: Option<i64>,
    /// Linked login account
    pub user_id: Option<Uuid>,
}

impl EmployeeUpdate {
    /// Check that provided text fields are not blank
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if a provided `surname` or `name` is blank
    pub fn validate(&self) -> AppResult<()> {
        if let Some(surname) = &self.surname {
            require_text("surname", surname)?;
        }
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        Ok(())
    }
}

pub(crate) fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_rejected() {
        let update = EmployeeUpdate {
            name: Some("   ".to_owned()),
            ..EmployeeUpdate::default()
        };
        assert!(update.validate().is_err());
    }
}
