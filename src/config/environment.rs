// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a typed ServerConfig with validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! Environment-based configuration

use crate::constants::defaults;
use anyhow::{anyhow, bail, Context, Result};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Normal operation
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback to `Development`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        };
        f.write_str(name)
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite`, discarded on shutdown
    Memory,
}

impl DatabaseUrl {
    /// Parse a `sqlite:` URL or a bare file path
    ///
    /// # Errors
    ///
    /// Returns an error for non-SQLite URLs or an empty path
    pub fn parse_url(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.contains("://") && !s.starts_with("sqlite://") {
            bail!("Unsupported database URL '{s}': only sqlite is supported");
        }

        let path = s
            .strip_prefix("sqlite://")
            .or_else(|| s.strip_prefix("sqlite:"))
            .unwrap_or(s);
        let path = path.split('?').next().unwrap_or(path);

        match path {
            "" => bail!("Database path must not be empty"),
            ":memory:" => Ok(Self::Memory),
            _ => Ok(Self::SQLite {
                path: PathBuf::from(path),
            }),
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/repup.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_connection_string())
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database location
    pub url: DatabaseUrl,
}

/// Language model configuration
#[derive(Clone)]
pub struct LlmConfig {
    /// Groq API key; plan generation is disabled without one
    pub api_key: Option<String>,
    /// OpenAI-compatible API base URL
    pub base_url: String,
    /// Model used for workout plans
    pub model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Sampling temperature, provider default when unset
    pub temperature: Option<f32>,
    /// Completion token cap, provider default when unset
    pub max_tokens: Option<u32>,
}

impl LlmConfig {
    /// Whether an API key is configured
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// Session cookie configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cookie lifetime in days
    pub cookie_days: u32,
    /// Mark cookies `Secure`
    pub cookie_secure: bool,
}

/// HTTP layer configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Allowed CORS origins, `*` for any
    pub cors_allowed_origins: Vec<String>,
    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Largest accepted request body in bytes
    pub max_body_bytes: usize,
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Database settings
    pub database: DatabaseConfig,
    /// Language model settings
    pub llm: LlmConfig,
    /// Session cookie settings
    pub session: SessionConfig,
    /// HTTP layer settings
    pub http: HttpConfig,
}

/// Values given on the command line, applied over the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Listen port
    pub http_port: Option<u16>,
    /// Listen host
    pub host: Option<String>,
    /// Database URL
    pub database_url: Option<String>,
}

impl ServerConfig {
    /// Load and validate configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or validation fails
    pub fn from_env() -> Result<Self> {
        let config = Self::load_from_env()?;
        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables without validating it
    ///
    /// Callers that layer overrides on top must call [`Self::validate`] after.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed
    pub fn load_from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment = Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development"));

        let config = Self {
            host: env_var_or("HOST", defaults::HOST),
            http_port: parse_env("HTTP_PORT", defaults::HTTP_PORT)?,
            environment,
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            database: DatabaseConfig {
                url: DatabaseUrl::parse_url(&env_var_or("DATABASE_URL", defaults::DATABASE_URL))
                    .context("Invalid DATABASE_URL value")?,
            },
            llm: LlmConfig {
                api_key: optional_env("GROQ_API_KEY"),
                base_url: env_var_or("GROQ_BASE_URL", defaults::GROQ_BASE_URL),
                model: env_var_or("GROQ_MODEL", defaults::GROQ_MODEL),
                timeout_secs: parse_env("LLM_TIMEOUT_SECS", defaults::LLM_TIMEOUT_SECS)?,
                temperature: parse_optional_env("LLM_TEMPERATURE")?,
                max_tokens: parse_optional_env("LLM_MAX_TOKENS")?,
            },
            session: SessionConfig {
                cookie_days: parse_env("SESSION_COOKIE_DAYS", defaults::SESSION_COOKIE_DAYS)?,
                cookie_secure: parse_env("COOKIE_SECURE", environment.is_production())?,
            },
            http: HttpConfig {
                cors_allowed_origins: parse_origins(&env_var_or(
                    "CORS_ALLOWED_ORIGINS",
                    defaults::CORS_ALLOWED_ORIGINS,
                )),
                request_timeout_secs: parse_env(
                    "REQUEST_TIMEOUT_SECS",
                    defaults::REQUEST_TIMEOUT_SECS,
                )?,
                max_body_bytes: parse_env("MAX_BODY_BYTES", defaults::MAX_BODY_BYTES)?,
            },
        };

        Ok(config)
    }

    /// Replace environment values with command-line overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the database URL override cannot be parsed
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) -> Result<()> {
        if let Some(http_port) = overrides.http_port {
            self.http_port = http_port;
        }
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(database_url) = overrides.database_url {
            self.database.url =
                DatabaseUrl::parse_url(&database_url).context("Invalid --database-url value")?;
        }
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid value
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            bail!("HTTP_PORT must not be 0");
        }
        if !(1..=365).contains(&self.session.cookie_days) {
            bail!("SESSION_COOKIE_DAYS must be between 1 and 365");
        }
        if let Some(temperature) = self.llm.temperature {
            if !(0.0..=2.0).contains(&temperature) {
                bail!("LLM_TEMPERATURE must be between 0 and 2");
            }
        }
        if self.llm.timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than 0");
        }
        if self.http.request_timeout_secs == 0 {
            bail!("REQUEST_TIMEOUT_SECS must be greater than 0");
        }
        if self.http.max_body_bytes == 0 {
            bail!("MAX_BODY_BYTES must be greater than 0");
        }

        if self.environment.is_production() && !self.session.cookie_secure {
            warn!("COOKIE_SECURE is disabled in production");
        }
        if !self.llm.is_enabled() {
            warn!("GROQ_API_KEY is not set, workout plan generation is disabled");
        }
        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "RepUp Server Configuration:\n\
             - Environment: {}\n\
             - Listen: {}:{}\n\
             - Log Level: {}\n\
             - Database: {}\n\
             - LLM: {}\n\
             - Session Cookies: {} days{}\n\
             - CORS Origins: {}\n\
             - Request Timeout: {}s",
            self.environment,
            self.host,
            self.http_port,
            self.log_level,
            if self.database.url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            if self.llm.is_enabled() {
                format!("Groq ({})", self.llm.model)
            } else {
                "Disabled".to_owned()
            },
            self.session.cookie_days,
            if self.session.cookie_secure {
                ", secure"
            } else {
                ""
            },
            self.http.cors_allowed_origins.join(", "),
            self.http.request_timeout_secs,
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Get a non-blank environment variable
fn optional_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    optional_env(key).map_or(Ok(default), |raw| {
        raw.parse::<T>()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| format!("Invalid {key} value: {raw}"))
    })
}

/// Parse an optional environment variable
fn parse_optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    optional_env(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| anyhow!("{e}"))
                .with_context(|| format!("Invalid {key} value: {raw}"))
        })
        .transpose()
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        return vec!["*".to_owned()];
    }
    origins_str
        .split(',')
        .map(|s| s.trim().trim_end_matches('/').to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}
