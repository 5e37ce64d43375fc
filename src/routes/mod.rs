// ABOUTME: Route module organization for the RepUp HTTP API
// ABOUTME: Route groups by domain plus the JSON body extractor shared by handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! Route module for the `RepUp` server
//!
//! Each domain module holds route definitions and thin handlers: session
//! check, database or LLM call, JSON response.

/// Sign-in, sign-out and current user
pub mod auth;
/// Dashboard summary and progress series
pub mod dashboard;
/// Liveness and readiness
pub mod health;
/// AI workout plan generation and retrieval
pub mod plans;
/// User fitness details
pub mod profile;
/// Workout session logging
pub mod workouts;

pub use auth::{AuthRoutes, LoginRequest, LoginResponse};
pub use dashboard::DashboardRoutes;
pub use health::HealthRoutes;
pub use plans::{GenerateWorkoutPlanRequest, WorkoutPlanRoutes};
pub use profile::ProfileRoutes;
pub use workouts::WorkoutRoutes;

use axum::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// JSON body extractor whose rejections use the API error envelope
///
/// `axum::Json` answers malformed bodies with plain text; handlers use this
/// wrapper so clients always receive `{"error", "code"}`. Authenticated
/// handlers take `Result<ApiJson<T>, AppError>` so the session check runs
/// before a body rejection is reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection_error(&rejection)),
        }
    }
}

fn json_rejection_error(rejection: &JsonRejection) -> AppError {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => AppError::invalid_input("Request body is too large"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => {
            AppError::invalid_input("Expected a JSON body with Content-Type: application/json")
        }
        _ => AppError::invalid_input(rejection.body_text()),
    }
}

/// Parse an optional JSON body from raw bytes, `None` when blank
pub(crate) fn parse_optional_json<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body)
        .map(Some)
        .map_err(|e| AppError::invalid_input(format!("Invalid JSON body: {e}")))
}
