// ABOUTME: Shared server state handed to every route group
// ABOUTME: Database handle, optional LLM provider and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::llm::LlmProvider;

/// Resources shared by all handlers
///
/// Built once at startup and wrapped in an `Arc`; route groups receive it as
/// axum state.
pub struct ServerResources {
    /// Database manager
    pub database: Arc<Database>,
    /// Language model for plan generation, `None` when not configured
    pub llm_provider: Option<Arc<dyn LlmProvider>>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Bundle the server resources
    #[must_use]
    pub fn new(
        database: Database,
        llm_provider: Option<Arc<dyn LlmProvider>>,
        config: ServerConfig,
    ) -> Self {
        Self {
            database: Arc::new(database),
            llm_provider,
            config: Arc::new(config),
        }
    }

    /// The configured LLM provider
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_MISSING` when no provider is configured
    pub fn llm(&self) -> AppResult<&Arc<dyn LlmProvider>> {
        self.llm_provider.as_ref().ok_or_else(|| {
            AppError::config_missing("Workout plan generation is not configured (GROQ_API_KEY)")
        })
    }
}
