// ABOUTME: Main library entry point for the RepUp fitness tracking server
// ABOUTME: HTTP API for profiles, workout logging and AI-generated workout plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

#![deny(unsafe_code)]

//! # `RepUp` Server
//!
//! JSON API behind the `RepUp` web client. Users sign in, fill a fitness
//! profile, log workout sessions and request a 90-day workout plan written
//! by a language model from their profile.
//!
//! ## Architecture
//!
//! - **Routes**: thin axum handlers: session cookie check, database or LLM call, JSON
//! - **Database**: `SQLite` through sqlx, one manager per table
//! - **LLM**: provider trait with a Groq implementation and the plan prompt template
//! - **Config**: environment-driven `ServerConfig`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use repup_server::config::environment::ServerConfig;
//! use repup_server::database::Database;
//! use repup_server::resources::ServerResources;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let database = Database::new(&config.database.url.to_connection_string()).await?;
//!     let (host, port) = (config.host.clone(), config.http_port);
//!     let resources = Arc::new(ServerResources::new(database, None, config));
//!     repup_server::server::run(resources, &host, port).await?;
//!     Ok(())
//! }
//! ```

/// Session authentication for route handlers
pub mod auth;

/// Configuration management
pub mod config;

/// Application constants
pub mod constants;

/// `SQLite` persistence
pub mod database;

/// Error types
pub mod errors;

/// Language model providers and prompt templates
pub mod llm;

/// Logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Shared server state
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Session cookies
pub mod security;

/// Server assembly and lifecycle
pub mod server;

/// Domain services built on the database
pub mod services;

/// Domain models
pub mod models {
    pub use repup_core::models::*;
}
