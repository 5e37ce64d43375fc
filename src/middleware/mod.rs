// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, span creation and the CORS layer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

/// CORS configuration
pub mod cors;
/// Request tracing and correlation ids
pub mod tracing;

pub use cors::setup_cors;
pub use self::tracing::{create_request_span, record_response, MakeRequestUuid};
