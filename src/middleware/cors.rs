// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Wildcard origins for development, an explicit list with credentials otherwise
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

use crate::config::HttpConfig;

/// Configure CORS from `CORS_ALLOWED_ORIGINS`
///
/// Browsers refuse credentialed requests against a wildcard origin, so
/// cookies only flow cross-origin when explicit origins are configured.
///
/// ```bash
/// # Any origin, no cookies cross-origin (development)
/// export CORS_ALLOWED_ORIGINS="*"
///
/// # Front-end origin with cookies
/// export CORS_ALLOWED_ORIGINS="https://repup.app"
/// ```
#[must_use]
pub fn setup_cors(config: &HttpConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter(|origin| origin.as_str() != "*")
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .map_err(|e| warn!("Ignoring invalid CORS origin {origin}: {e}"))
                .ok()
        })
        .collect();

    let base = CorsLayer::new()
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            header::AUTHORIZATION,
            header::HeaderName::from_static("x-requested-with"),
            header::HeaderName::from_static("x-request-id"),
        ])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .expose_headers([header::HeaderName::from_static("x-request-id")]);

    if origins.is_empty() {
        base.allow_origin(AllowOrigin::any())
    } else {
        base.allow_origin(AllowOrigin::list(origins))
            .allow_credentials(true)
    }
}
