// ABOUTME: Error types for the RepUp server
// ABOUTME: Re-exports the unified error system from repup-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! # Unified Error Handling System
//!
//! The error types live in `repup-core` so the models can validate without a
//! dependency on the server crate. This module re-exports them under the
//! path the rest of the server uses.

pub use repup_core::errors::{AppError, AppResult, ErrorCode, ErrorContext, ErrorResponse};
