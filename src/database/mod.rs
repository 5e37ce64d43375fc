// ABOUTME: SQLite persistence for users, fitness details, workout sessions and plans
// ABOUTME: Owns the connection pool and runs idempotent schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! # Database Management
//!
//! [`Database`] wraps a `SQLite` pool. Operations are split by table across
//! the submodules, each adding an `impl Database` block together with the
//! migration for its table. Every per-user query filters on `user_id`.

mod plans;
mod profiles;
mod users;
mod workouts;

use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Database manager for all `RepUp` tables
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// In-memory URLs get a single long-lived connection so every query
    /// sees the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the file cannot be created or
    /// a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid database URL {database_url}: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        if !in_memory {
            ensure_parent_dir(options.get_filename())?;
        }

        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!(in_memory, "Database ready");
        Ok(db)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_users().await?;
        self.migrate_profiles().await?;
        self.migrate_workouts().await?;
        self.migrate_plans().await?;
        debug!("Database migrations complete");
        Ok(())
    }

    /// Check that the database answers queries
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn ensure_parent_dir(path: &Path) -> AppResult<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::config(format!(
                    "Cannot create database directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}

/// Timestamp text as stored in every `created_at`/`updated_at` column
///
/// Fixed-width so lexical and chronological order agree.
pub(crate) fn timestamp_text(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(column: &str, text: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::database(format!("Invalid {column} timestamp '{text}': {e}")))
}

pub(crate) fn parse_uuid(column: &str, text: &str) -> AppResult<Uuid> {
    Uuid::parse_str(text)
        .map_err(|e| AppError::database(format!("Invalid {column} identifier '{text}': {e}")))
}
