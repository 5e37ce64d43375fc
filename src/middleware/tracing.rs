// ABOUTME: Request tracing middleware for correlation and structured logging
// ABOUTME: Generates request IDs and creates an http_request span per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use std::time::Duration;

use axum::http::{HeaderValue, Request, StatusCode};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

use crate::constants::headers::REQUEST_ID;

/// Generates `req_<uuid>` request ids for requests that arrive without one
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&format!("req_{}", Uuid::new_v4().simple()))
            .ok()
            .map(RequestId::new)
    }
}

/// Create the tracing span for an HTTP request
///
/// `user_id` is filled in by authentication, `status_code` and
/// `duration_ms` by [`record_response`].
pub fn create_request_span<B>(request: &Request<B>) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
        user_id = tracing::field::Empty,
        status_code = tracing::field::Empty,
        duration_ms = tracing::field::Empty,
    )
}

/// Record the outcome of a request on its span and log it
pub fn record_response(status: StatusCode, latency: Duration, span: &Span) {
    let duration_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
    span.record("status_code", status.as_u16());
    span.record("duration_ms", duration_ms);

    if status.is_server_error() {
        tracing::warn!(status = status.as_u16(), duration_ms, "Request failed");
    } else {
        tracing::info!(status = status.as_u16(), duration_ms, "Request completed");
    }
}
