// ABOUTME: Workout session storage
// ABOUTME: Inserts logged sessions and lists them newest first per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use std::time::Instant;

use chrono::{NaiveDate, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{parse_uuid, timestamp_text, Database};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{Exercise, NewWorkoutSession, WorkoutSession};

const SESSION_COLUMNS: &str = "workout_id, user_id, name, date, duration, exercises";

impl Database {
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_sessions (
                workout_id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                name TEXT NOT NULL,
                date TEXT NOT NULL,
                duration REAL NOT NULL,
                exercises TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout_sessions table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_date ON workout_sessions(user_id, date)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout_sessions index: {e}")))?;

        Ok(())
    }

    /// Store a validated workout session
    ///
    /// A missing date is stored as today (UTC).
    ///
    /// # Errors
    ///
    /// Returns an error if the exercises cannot be encoded or the insert fails
    pub async fn insert_workout_session(
        &self,
        user_id: Uuid,
        session: &NewWorkoutSession,
    ) -> AppResult<WorkoutSession> {
        let started = Instant::now();
        let date = session.date_or_today();
        let exercises = serde_json::to_string(&session.exercises)?;

        let result = sqlx::query(
            r"
            INSERT INTO workout_sessions (user_id, name, date, duration, exercises, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(user_id.to_string())
        .bind(&session.name)
        .bind(date.to_string())
        .bind(session.duration)
        .bind(&exercises)
        .bind(timestamp_text(Utc::now()))
        .execute(&self.pool)
        .await;

        AppLogger::log_database_operation(
            "insert",
            "workout_sessions",
            result.is_ok(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        let result =
            result.map_err(|e| AppError::database(format!("Failed to log workout: {e}")))?;

        Ok(WorkoutSession {
            id: result.last_insert_rowid(),
            user_id,
            name: session.name.clone(),
            date,
            duration: session.duration,
            exercises: session.exercises.clone(),
        })
    }

    /// List a user's sessions, newest date first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_workout_sessions(&self, user_id: Uuid) -> AppResult<Vec<WorkoutSession>> {
        let rows = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM workout_sessions
             WHERE user_id = $1
             ORDER BY date DESC, workout_id DESC"
        ))
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter().map(row_to_session).collect()
    }

    /// Count a user's sessions
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_workout_sessions(&self, user_id: Uuid) -> AppResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM workout_sessions WHERE user_id = $1")
                .bind(user_id.to_string())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to count workouts: {e}")))?;
        Ok(count)
    }

    /// Most recent session by date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn latest_workout_session(&self, user_id: Uuid) -> AppResult<Option<WorkoutSession>> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM workout_sessions
             WHERE user_id = $1
             ORDER BY date DESC, workout_id DESC
             LIMIT 1"
        ))
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get latest workout: {e}")))?;

        row.as_ref().map(row_to_session).transpose()
    }
}

fn row_to_session(row: &SqliteRow) -> AppResult<WorkoutSession> {
    let user_id: String = row.try_get("user_id")?;
    let date: String = row.try_get("date")?;
    let exercises: String = row.try_get("exercises")?;

    Ok(WorkoutSession {
        id: row.try_get("workout_id")?,
        user_id: parse_uuid("workout_sessions.user_id", &user_id)?,
        name: row.try_get("name")?,
        date: NaiveDate::parse_from_str(&date, "%Y-%m-%d")
            .map_err(|e| AppError::database(format!("Invalid stored workout date '{date}': {e}")))?,
        duration: row.try_get("duration")?,
        exercises: serde_json::from_str::<Vec<Exercise>>(&exercises)?,
    })
}
