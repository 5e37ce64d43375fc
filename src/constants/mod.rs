// ABOUTME: Application constants for the RepUp server
// ABOUTME: Configuration defaults, cookie and header names, plan generation limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! Constants shared across the server
//!
//! Validation bounds live in `repup-core` and are re-exported here so
//! handlers import everything from one place.

pub use repup_core::constants::{profile_limits, workout_limits, DEFAULT_USER_NAME};

/// Defaults used when an environment variable is unset
pub mod defaults {
    /// Bind address
    pub const HOST: &str = "127.0.0.1";
    /// HTTP listen port
    pub const HTTP_PORT: u16 = 8080;
    /// `SQLite` database location
    pub const DATABASE_URL: &str = "sqlite:./data/repup.db";
    /// OpenAI-compatible Groq endpoint
    pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
    /// Model used for plan generation
    pub const GROQ_MODEL: &str = "llama3-8b-8192";
    /// Upper bound on a single completion call
    pub const LLM_TIMEOUT_SECS: u64 = 60;
    /// Session cookie lifetime
    pub const SESSION_COOKIE_DAYS: u32 = 7;
    /// Allowed CORS origins, comma separated
    pub const CORS_ALLOWED_ORIGINS: &str = "*";
    /// Must exceed `LLM_TIMEOUT_SECS` so generation errors reach the client
    pub const REQUEST_TIMEOUT_SECS: u64 = 90;
    /// 1 MiB
    pub const MAX_BODY_BYTES: usize = 1_048_576;
}

/// Session cookie names read by the web client
pub mod cookies {
    /// Signed-in user id
    pub const USER_ID: &str = "uid";
    /// Display name shown in the navigation bar
    pub const USER_NAME: &str = "uname";
}

/// HTTP header names
pub mod headers {
    /// Correlation id set on every request and echoed on the response
    pub const REQUEST_ID: &str = "x-request-id";
}

/// Workout plan generation and history
pub mod plans {
    /// Longest client-built prompt accepted
    pub const MAX_PROMPT_CHARS: usize = 8000;
    /// Plans returned by the history route when no limit is given
    pub const DEFAULT_HISTORY_LIMIT: u32 = 10;
    /// Largest accepted history limit
    pub const MAX_HISTORY_LIMIT: u32 = 50;
    /// Title of the downloaded plan document, also its file name
    pub const DOCUMENT_TITLE: &str = "RepUp Workout Plan";
}

/// Service names used in logs and health responses
pub mod service_names {
    /// This server
    pub const REPUP_SERVER: &str = "repup-server";
}
