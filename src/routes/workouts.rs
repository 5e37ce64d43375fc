// ABOUTME: Workout session route handlers
// ABOUTME: Logs sessions from the tracker page and lists them newest first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! Workout logging routes
//!
//! The paths keep the names the tracker page already calls.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tracing::info;

use super::ApiJson;
use crate::auth::authenticate_request;
use crate::errors::AppError;
use crate::models::NewWorkoutSession;
use crate::resources::ServerResources;

/// Workout session routes
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/logWorkout", post(Self::handle_log_workout))
            .route("/api/getWorkouts", get(Self::handle_get_workouts))
            .with_state(resources)
    }

    async fn handle_log_workout(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<ApiJson<NewWorkoutSession>, AppError>,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;
        let ApiJson(mut session) = body?;

        session.validate()?;
        let workout = resources
            .database
            .insert_workout_session(user.id, &session)
            .await?;
        info!(user_id = %user.id, workout_id = workout.id, "Workout logged");

        Ok((
            StatusCode::CREATED,
            Json(json!({
                "message": "Workout added successfully",
                "workout": workout,
            })),
        )
            .into_response())
    }

    async fn handle_get_workouts(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;
        let workouts = resources.database.list_workout_sessions(user.id).await?;
        Ok((StatusCode::OK, Json(workouts)).into_response())
    }
}
