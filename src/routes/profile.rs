// ABOUTME: Fitness profile route handlers
// ABOUTME: Reads and replaces the user fitness details that drive plan generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tracing::info;

use super::ApiJson;
use crate::auth::authenticate_request;
use crate::errors::AppError;
use crate::models::FitnessProfile;
use crate::resources::ServerResources;

/// Fitness profile routes
pub struct ProfileRoutes;

impl ProfileRoutes {
    /// Create all profile routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/profile",
                get(Self::handle_get_profile).put(Self::handle_save_profile),
            )
            .with_state(resources)
    }

    async fn handle_get_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;

        let profile = resources
            .database
            .get_fitness_profile(user.id)
            .await?
            .ok_or_else(|| AppError::not_found("Fitness profile"))?;

        Ok((StatusCode::OK, Json(profile)).into_response())
    }

    async fn handle_save_profile(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<ApiJson<FitnessProfile>, AppError>,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;
        let ApiJson(mut profile) = body?;

        profile.validate()?;
        resources
            .database
            .upsert_fitness_profile(user.id, &profile)
            .await?;
        info!(user_id = %user.id, "Fitness profile saved");

        Ok((StatusCode::OK, Json(profile)).into_response())
    }
}
