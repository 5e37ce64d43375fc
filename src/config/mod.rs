// ABOUTME: Configuration management module for server settings
// ABOUTME: Re-exports the environment-driven ServerConfig and its parts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! Configuration module for the `RepUp` server

/// Environment and server configuration
pub mod environment;

pub use environment::{
    ConfigOverrides, DatabaseConfig, DatabaseUrl, Environment, HttpConfig, LlmConfig, LogLevel,
    ServerConfig, SessionConfig,
};
