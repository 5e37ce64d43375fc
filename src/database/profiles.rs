// ABOUTME: User fitness details storage
// ABOUTME: One row per user, replaced wholesale whenever the profile form is saved
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use chrono::Utc;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{timestamp_text, Database};
use crate::errors::{AppError, AppResult};
use crate::models::{FitnessProfile, WorkoutSplit};

impl Database {
    pub(super) async fn migrate_profiles(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS user_fitness_details (
                user_id TEXT PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
                gender TEXT NOT NULL,
                age INTEGER NOT NULL,
                height REAL NOT NULL,
                weight REAL NOT NULL,
                active_days INTEGER NOT NULL,
                has_equipment BOOLEAN NOT NULL,
                goal TEXT NOT NULL,
                goal_weight REAL NOT NULL,
                injuries TEXT,
                fitness_level TEXT NOT NULL,
                workout_split TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create user_fitness_details table: {e}")))?;
        Ok(())
    }

    /// Create or replace a user's fitness details
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the write fails
    pub async fn upsert_fitness_profile(
        &self,
        user_id: Uuid,
        profile: &FitnessProfile,
    ) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO user_fitness_details (
                user_id, gender, age, height, weight, active_days, has_equipment,
                goal, goal_weight, injuries, fitness_level, workout_split, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT(user_id) DO UPDATE SET
                gender = excluded.gender,
                age = excluded.age,
                height = excluded.height,
                weight = excluded.weight,
                active_days = excluded.active_days,
                has_equipment = excluded.has_equipment,
                goal = excluded.goal,
                goal_weight = excluded.goal_weight,
                injuries = excluded.injuries,
                fitness_level = excluded.fitness_level,
                workout_split = excluded.workout_split,
                updated_at = excluded.updated_at
            ",
        )
        .bind(user_id.to_string())
        .bind(profile.gender.as_str())
        .bind(i64::from(profile.age))
        .bind(profile.height)
        .bind(profile.weight)
        .bind(i64::from(profile.active_days))
        .bind(profile.has_equipment)
        .bind(profile.goal.as_str())
        .bind(profile.goal_weight)
        .bind(profile.injuries.as_deref())
        .bind(profile.fitness_level.as_str())
        .bind(profile.workout_split.as_str())
        .bind(timestamp_text(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to save fitness details: {e}")))?;

        Ok(())
    }

    /// Get a user's fitness details, `None` if the form was never filled
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored value is malformed
    pub async fn get_fitness_profile(&self, user_id: Uuid) -> AppResult<Option<FitnessProfile>> {
        let row = sqlx::query(
            r"
            SELECT gender, age, height, weight, active_days, has_equipment, goal,
                   goal_weight, injuries, fitness_level, workout_split
            FROM user_fitness_details
            WHERE user_id = $1
            ",
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get fitness details: {e}")))?;

        row.as_ref().map(row_to_profile).transpose()
    }
}

fn row_to_profile(row: &SqliteRow) -> AppResult<FitnessProfile> {
    let stored = |column: &str, e: AppError| {
        AppError::database(format!("Invalid stored {column}: {}", e.message))
    };

    let gender: String = row.try_get("gender")?;
    let goal: String = row.try_get("goal")?;
    let level: String = row.try_get("fitness_level")?;
    let split: String = row.try_get("workout_split")?;
    let age: i64 = row.try_get("age")?;
    let active_days: i64 = row.try_get("active_days")?;

    Ok(FitnessProfile {
        gender: gender.parse().map_err(|e| stored("gender", e))?,
        age: u32::try_from(age).map_err(|_| AppError::database("Invalid stored age"))?,
        height: row.try_get("height")?,
        weight: row.try_get("weight")?,
        active_days: u32::try_from(active_days)
            .map_err(|_| AppError::database("Invalid stored active_days"))?,
        has_equipment: row.try_get("has_equipment")?,
        goal: goal.parse().map_err(|e| stored("goal", e))?,
        goal_weight: row.try_get("goal_weight")?,
        injuries: row.try_get("injuries")?,
        fitness_level: level.parse().map_err(|e| stored("fitness_level", e))?,
        workout_split: WorkoutSplit::parse_lenient(&split)
            .map_err(|e| stored("workout_split", e))?,
    })
}
