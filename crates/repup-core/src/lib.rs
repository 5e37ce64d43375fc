// ABOUTME: Core types for the RepUp fitness tracking service
// ABOUTME: Foundation crate with error handling, domain models and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

#![deny(unsafe_code)]

//! # `RepUp` Core
//!
//! Foundation crate shared by the `RepUp` server and its tooling. It changes
//! infrequently, which keeps incremental builds of the server crate fast.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and the JSON error envelope
//! - **models**: Users, fitness profiles, workout sessions and workout plans
//! - **constants**: Validation bounds and shared literals

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Domain models (users, fitness profiles, workout sessions, plans)
pub mod models;

/// Validation limits and shared constants
pub mod constants;
