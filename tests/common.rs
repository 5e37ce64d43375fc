// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, test configuration, resources and signed-in users
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `repup_server`

use std::sync::{Arc, Once};

use anyhow::Result;
use chrono::NaiveDate;
use repup_server::config::{
    DatabaseConfig, DatabaseUrl, Environment, HttpConfig, LlmConfig, LogLevel, ServerConfig,
    SessionConfig,
};
use repup_server::database::Database;
use repup_server::llm::LlmProvider;
use repup_server::models::{
    Exercise, FitnessGoal, FitnessLevel, FitnessProfile, Gender, NewWorkoutSession, User,
    WorkoutSplit,
};
use repup_server::resources::ServerResources;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Configuration used by route tests
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_owned(),
        http_port: 8080,
        environment: Environment::Testing,
        log_level: LogLevel::Warn,
        database: DatabaseConfig {
            url: DatabaseUrl::Memory,
        },
        llm: LlmConfig {
            api_key: None,
            base_url: "http://127.0.0.1:9".to_owned(),
            model: "mock-model".to_owned(),
            timeout_secs: 5,
            temperature: None,
            max_tokens: None,
        },
        session: SessionConfig {
            cookie_days: 7,
            cookie_secure: false,
        },
        http: HttpConfig {
            cors_allowed_origins: vec!["*".to_owned()],
            request_timeout_secs: 30,
            max_body_bytes: 64 * 1024,
        },
    }
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(Database::new("sqlite::memory:").await?)
}

/// Server resources over a fresh in-memory database
pub async fn create_test_resources(
    llm_provider: Option<Arc<dyn LlmProvider>>,
) -> Result<Arc<ServerResources>> {
    let database = create_test_database().await?;
    Ok(Arc::new(ServerResources::new(
        database,
        llm_provider,
        test_config(),
    )))
}

/// Create a user with the given email
pub async fn create_test_user_with_email(database: &Database, email: &str) -> Result<User> {
    let user = User::new(Uuid::new_v4(), "Test User".to_owned(), email.to_owned());
    Ok(database.upsert_user(&user).await?)
}

/// Create a standard test user
pub async fn create_test_user(database: &Database) -> Result<User> {
    create_test_user_with_email(database, "test@example.com").await
}

/// `Cookie` header value identifying `user`
pub fn session_cookie(user: &User) -> String {
    format!(
        "uid={}; uname={}",
        user.id,
        urlencoding::encode(&user.name)
    )
}

/// A complete, valid fitness profile
pub fn sample_profile() -> FitnessProfile {
    FitnessProfile {
        gender: Gender::Male,
        age: 28,
        height: 180.0,
        weight: 82.5,
        active_days: 4,
        has_equipment: true,
        goal: FitnessGoal::MuscleGain,
        goal_weight: 86.0,
        injuries: None,
        fitness_level: FitnessLevel::Intermediate,
        workout_split: WorkoutSplit::PushPullLegs,
    }
}

/// A session with two exercises on `date`
pub fn sample_session(name: &str, date: NaiveDate, duration: f64) -> NewWorkoutSession {
    NewWorkoutSession {
        name: name.to_owned(),
        date: Some(date),
        duration,
        exercises: vec![
            Exercise {
                exercise_name: "Bench Press".to_owned(),
                sets: 3,
                reps: 8,
                weight: 60.0,
            },
            Exercise {
                exercise_name: "Pull Up".to_owned(),
                sets: 3,
                reps: 10,
                weight: 0.0,
            },
        ],
    }
}

/// Calendar date helper
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
