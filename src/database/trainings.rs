// ABOUTME: Training session storage operations
// ABOUTME: CRUD over the trainings table; coach links clear when the employee is removed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Clubhouse Contributors

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::{Database, DbResult};
use crate::errors::DatabaseError;
use crate::models::{NewTraining, Training, TrainingUpdate};

const TRAINING_COLUMNS: &str =
    "id, title, description, training_date, location, duration, coach_id";

impl Database {
    /// Create the trainings table
    pub(super) async fn migrate_trainings(&self) -> DbResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS trainings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                training_date TEXT NOT NULL,
                location TEXT NOT NULL,
                duration INTEGER,
                coach_id INTEGER REFERENCES employees(id) ON DELETE SET NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_trainings_date ON trainings(training_date)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Insert a training session and return the stored row
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::InvalidReference`] if `coach_id` names no employee
    pub async fn create_training(&self, training: &NewTraining) -> DbResult<Training> {
        let id = sqlx::query(
            r"
            INSERT INTO trainings (title, description, training_date, location, duration, coach_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(&training.title)
        .bind(&training.description)
        .bind(training.training_date)
        .bind(&training.location)
        .bind(training.duration)
        .bind(training.coach_id)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.get_training(id).await?.ok_or_else(|| not_found(id))
    }

    /// Get a training session by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row cannot be decoded
    pub async fn get_training(&self, id: i64) -> DbResult<Option<Training>> {
        let query = format!("SELECT {TRAINING_COLUMNS} FROM trainings WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_training).transpose()
    }

    /// List sessions in schedule order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be decoded
    pub async fn list_trainings(&self) -> DbResult<Vec<Training>> {
        let query =
            format!("SELECT {TRAINING_COLUMNS} FROM trainings ORDER BY training_date ASC, id ASC");
        let rows = sqlx::query(&query).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_training).collect()
    }

    /// Apply a partial update in one statement and return the stored result
    ///
    /// Absent fields keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the session does not exist, or
    /// [`DatabaseError::InvalidReference`] if `coach_id` names no employee
    pub async fn update_training(&self, id: i64, update: TrainingUpdate) -> DbResult<Training> {
        let query = format!(
            r"
            UPDATE trainings SET
                title = COALESCE($1, title),
                description = COALESCE($2, description),
                training_date = COALESCE($3, training_date),
                location = COALESCE($4, location),
                duration = COALESCE($5, duration),
                coach_id = COALESCE($6, coach_id)
            WHERE id = $7
            RETURNING {TRAINING_COLUMNS}
            "
        );
        let row = sqlx::query(&query)
            .bind(update.title)
            .bind(update.description)
            .bind(update.training_date)
            .bind(update.location)
            .bind(update.duration)
            .bind(update.coach_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| not_found(id))?;

        row_to_training(&row)
    }

    /// Delete a training session
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::NotFound`] if the session does not exist
    pub async fn delete_training(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM trainings WHERE id = $1")
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
        entity: "training",
        id: id.to_string(),
    }
}

fn row_to_training(row: &SqliteRow) -> DbResult<Training> {
    Ok(Training {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        training_date: row.try_get("training_date")?,
        location: row.try_get("location")?,
        duration: row.try_get("duration")?,
        coach_id: row.try_get("coach_id")?,
    })
}
