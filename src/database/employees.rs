// ABOUTME: Employee record storage operations
// ABOUTME: CRUD over the employees table; user links are detached when an identity is deleted
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{parse_stored_uuid, Database, DbResult};
use crate::errors::DatabaseError;
use crate::models::{Employee, EmployeeUpdate, NewEmployee};

const EMPLOYEE_COLUMNS: &str = "id, surname, name, patronymic, birthdate, position_id, user_id";

impl Database {
    /// Create the employees table
    pub(super) async fn migrate_employees(&self) -> DbResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS employees (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                surname TEXT NOT NULL,
                name TEXT NOT NULL,
                patronymic TEXT,
                birthdate TEXT NOT NULL,
                position_id INTEGER NOT NULL,
                user_id TEXT REFERENCES users(id)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_employees_user_id ON employees(user_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Insert an employee and return the stored row
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::InvalidReference`] if `user_id` names no identity
    pub async fn create_employee(&self, employee: &NewEmployee) -> DbResult<Employee> {
        let id = sqlx::query(
            r"
            INSERT INTO employees (surname, name, patronymic, birthdate, position_id, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&employee.surname)
        .bind(&employee.name)
        .bind(&employee.patronymic)
        .bind(employee.birthdate)
        .bind(employee.position_id)
        .bind(employee.user_id.map(|id| id.to_string()))
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_employee(id).await?.ok_or_else(|| not_found(id))
    }

    /// Get an employee by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_employee(&self, id: i64) -> DbResult<Option<Employee>> {
        let query = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_employee).transpose()
    }

    /// List all employees
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_employees(&self) -> DbResult<Vec<Employee>> {
        let query = format!("SELECT {EMPLOYEE_COLUMNS} FROM employees ORDER BY id ASC");
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_employee).collect()
    }

    /// Apply a partial update in one statement and return the stored result
    ///
    /// Absent fields keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the employee does not exist, or
    /// [`DatabaseError::InvalidReference`] if `user_id` names no identity
    pub async fn update_employee(&self, id: i64, update: EmployeeUpdate) -> DbResult<Employee> {
        let query = format!(
            r"
            UPDATE employees SET
                surname = COALESCE($1, surname),
                name = COALESCE($2, name),
                patronymic = COALESCE($3, patronymic),
                birthdate = COALESCE($4, birthdate),
                position_id = COALESCE($5, position_id),
                user_id = COALESCE($6, user_id)
            WHERE id = $7
            RETURNING {EMPLOYEE_COLUMNS}
            "
        );
        let row = sqlx::query(&query)
            .bind(update.surname)
            .bind(update.name)
            .bind(update.patronymic)
            .bind(update.birthdate)
            .bind(update.position_id)
            .bind(update.user_id.map(|user_id| user_id.to_string()))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        row_to_employee(&row)
    }

    /// Delete an employee
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the employee does not exist
    pub async fn delete_employee(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }
        Ok(())
    }
}

fn not_found(id: i64) -> DatabaseError {
    DatabaseError::NotFound {
        entity: "employee",
        id: id.to_string(),
    }
}

fn row_to_employee(row: &SqliteRow) -> DbResult<Employee> {
    let birthdate: NaiveDate = row.try_get("birthdate")?;
    let user_id = row
        .try_get::<Option<String>, _>("user_id")?
        .map(|value| parse_stored_uuid("employees.user_id", &value))
        .transpose()?;

    Ok(Employee {
        id: row.try_get("id")?,
        surname: row.try_get("surname")?,
        name: row.try_get("name")?,
        patronymic: row.try_get("patronymic")?,
        birthdate,
        position_id: row.try_get("position_id")?,
        user_id,
    })
}
