// ABOUTME: Generated workout plan storage
// ABOUTME: Keeps every plan per user so the latest and the history can be served
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid, timestamp_text, Database};
use crate::errors::{AppError, AppResult};
use crate::models::WorkoutPlan;

impl Database {
    pub(super) async fn migrate_plans(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users_workouts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
                workout_plan TEXT NOT NULL,
                model TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users_workouts table: {e}")))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_users_workouts_user_created ON users_workouts(user_id, created_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users_workouts index: {e}")))?;

        Ok(())
    }

    /// Store a generated plan
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert_workout_plan(
        &self,
        user_id: Uuid,
        content: &str,
        model: &str,
    ) -> AppResult<WorkoutPlan> {
        let created_at = Utc::now();
        let result = sqlx::query(
            r"
            INSERT INTO users_workouts (user_id, workout_plan, model, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(user_id.to_string())
        .bind(content)
        .bind(model)
        .bind(timestamp_text(created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store workout plan: {e}")))?;

        Ok(WorkoutPlan {
            id: result.last_insert_rowid(),
            user_id,
            content: content.to_owned(),
            model: model.to_owned(),
            created_at,
        })
    }

    /// Most recently generated plan
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn latest_workout_plan(&self, user_id: Uuid) -> AppResult<Option<WorkoutPlan>> {
        Ok(self.list_workout_plans(user_id, 1).await?.into_iter().next())
    }

    /// Plans newest first, at most `limit`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row is malformed
    pub async fn list_workout_plans(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<WorkoutPlan>> {
        let rows = sqlx::query(
            r"
            SELECT id, user_id, workout_plan, model, created_at
            FROM users_workouts
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            ",
        )
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workout plans: {e}")))?;

        rows.iter().map(row_to_plan).collect()
    }
}

fn row_to_plan(row: &SqliteRow) -> AppResult<WorkoutPlan> {
    let user_id: String = row.try_get("user_id")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(WorkoutPlan {
        id: row.try_get("id")?,
        user_id: parse_uuid("users_workouts.user_id", &user_id)?,
        content: row.try_get("workout_plan")?,
        model: row.try_get("model")?,
        created_at: parse_timestamp("users_workouts.created_at", &created_at)?,
    })
}
