// ABOUTME: User account storage
// ABOUTME: Upserts identities from sign-in and looks them up by id or email
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid, timestamp_text, Database};
use crate::errors::{AppError, AppResult};
use crate::models::User;

impl Database {
    pub(super) async fn migrate_users(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE COLLATE NOCASE,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create users table: {e}")))?;
        Ok(())
    }

    /// Insert a user or update the name and email of an existing id
    ///
    /// The original `created_at` is kept on update.
    ///
    /// # Errors
    ///
    /// Returns `RESOURCE_ALREADY_EXISTS` if the email belongs to another user
    pub async fn upsert_user(&self, user: &User) -> AppResult<User> {
        if let Some(existing) = self.get_user_by_email(&user.email).await? {
            if existing.id != user.id {
                return Err(AppError::already_exists(
                    "Email is already registered to another account",
                ));
            }
        }

        sqlx::query(
            r"
            INSERT INTO users (id, name, email, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT(id) DO UPDATE SET name = excluded.name, email = excluded.email
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(&user.email)
        .bind(timestamp_text(user.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::already_exists(
                "Email is already registered to another account",
            ),
            _ => AppError::database(format!("Failed to upsert user: {e}")),
        })?;

        self.get_user(user.id)
            .await?
            .ok_or_else(|| AppError::internal("User missing after upsert"))
    }

    /// Get a user by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_user(&self, user_id: Uuid) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT id, name, email, created_at FROM users WHERE id = $1")
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user: {e}")))?;

        row.as_ref().map(row_to_user).transpose()
    }

    /// Get a user by email, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the row is malformed
    pub async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query("SELECT id, name, email, created_at FROM users WHERE email = $1")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get user by email: {e}")))?;

        row.as_ref().map(row_to_user).transpose()
    }
}

fn row_to_user(row: &SqliteRow) -> AppResult<User> {
    let id: String = row.try_get("id")?;
    let created_at: String = row.try_get("created_at")?;
    Ok(User {
        id: parse_uuid("users.id", &id)?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        created_at: parse_timestamp("users.created_at", &created_at)?,
    })
}
