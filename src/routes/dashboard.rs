// ABOUTME: Dashboard route handlers
// ABOUTME: Serves the signed-in user's summary cards and training progress series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::authenticate_request;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::services::{build_progress, build_user_info};

/// Dashboard routes
pub struct DashboardRoutes;

impl DashboardRoutes {
    /// Create all dashboard routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/dashboard", get(Self::handle_dashboard))
            .route("/api/progress", get(Self::handle_progress))
            .with_state(resources)
    }

    async fn handle_dashboard(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;
        let info = build_user_info(&resources.database, &user).await?;
        Ok((StatusCode::OK, Json(info)).into_response())
    }

    async fn handle_progress(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;
        let sessions = resources.database.list_workout_sessions(user.id).await?;
        Ok((StatusCode::OK, Json(build_progress(&sessions))).into_response())
    }
}
