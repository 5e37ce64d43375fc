// ABOUTME: Workout plan route handlers
// ABOUTME: Generates plans through the LLM provider and serves the stored history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! Workout plan routes
//!
//! Generation accepts three body shapes:
//! - `{"prompt": "..."}` sends a client-built prompt as-is
//! - `{"profile": {...}}` renders the template from the given details
//! - no body renders the template from the stored fitness profile

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::parse_optional_json;
use crate::auth::authenticate_request;
use crate::constants::plans::{
    DEFAULT_HISTORY_LIMIT, DOCUMENT_TITLE, MAX_HISTORY_LIMIT, MAX_PROMPT_CHARS,
};
use crate::errors::{AppError, AppResult};
use crate::llm::{build_workout_plan_prompt, ChatMessage, ChatRequest};
use crate::models::{FitnessProfile, WorkoutPlan};
use crate::resources::ServerResources;

/// Body of `POST /api/generateWorkoutPlan`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateWorkoutPlanRequest {
    /// Client-built prompt, takes precedence over `profile`
    #[serde(default)]
    pub prompt: Option<String>,
    /// Fitness details to render the prompt from
    #[serde(default)]
    pub profile: Option<FitnessProfile>,
}

/// Query parameters for the plan history
#[derive(Debug, Deserialize)]
struct PlanHistoryQuery {
    limit: Option<i64>,
}

/// Workout plan routes
pub struct WorkoutPlanRoutes;

impl WorkoutPlanRoutes {
    /// Create all workout plan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/generateWorkoutPlan", post(Self::handle_generate))
            .route("/api/workoutPlan", get(Self::handle_latest))
            .route("/api/workoutPlans", get(Self::handle_history))
            .route("/api/workoutPlan/download", get(Self::handle_download))
            .with_state(resources)
    }

    /// Work out which prompt to send for this request
    async fn resolve_prompt(
        resources: &ServerResources,
        user_id: Uuid,
        request: GenerateWorkoutPlanRequest,
    ) -> AppResult<String> {
        if let Some(prompt) = request
            .prompt
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
        {
            if prompt.chars().count() > MAX_PROMPT_CHARS {
                return Err(AppError::invalid_input(format!(
                    "Prompt must be at most {MAX_PROMPT_CHARS} characters"
                )));
            }
            return Ok(prompt.to_owned());
        }

        let profile = match request.profile {
            Some(mut profile) => {
                profile.validate()?;
                profile
            }
            None => resources
                .database
                .get_fitness_profile(user_id)
                .await?
                .ok_or_else(|| {
                    AppError::missing_field(
                        "Fill in your fitness details before generating a workout plan",
                    )
                })?,
        };

        Ok(build_workout_plan_prompt(&profile))
    }

    async fn handle_generate(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Bytes,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;
        let provider = resources.llm()?;

        let request: GenerateWorkoutPlanRequest = parse_optional_json(&body)?.unwrap_or_default();
        let prompt = Self::resolve_prompt(&resources, user.id, request).await?;

        let llm_config = &resources.config.llm;
        let mut chat = ChatRequest::new(vec![ChatMessage::user(prompt)]);
        if let Some(temperature) = llm_config.temperature {
            chat = chat.with_temperature(temperature);
        }
        if let Some(max_tokens) = llm_config.max_tokens {
            chat = chat.with_max_tokens(max_tokens);
        }

        let response = provider.complete(&chat).await?;
        let content = response.content.trim();
        if content.is_empty() {
            return Err(AppError::external_service(
                provider.display_name(),
                "Model returned an empty workout plan",
            ));
        }

        let plan = resources
            .database
            .insert_workout_plan(user.id, content, &response.model)
            .await?;
        info!(
            user_id = %user.id,
            plan_id = plan.id,
            model = %plan.model,
            "Workout plan generated"
        );

        Ok((StatusCode::CREATED, Json(plan)).into_response())
    }

    async fn latest_plan(resources: &ServerResources, user_id: Uuid) -> AppResult<WorkoutPlan> {
        resources
            .database
            .latest_workout_plan(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Workout plan"))
    }

    async fn handle_latest(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;
        let plan = Self::latest_plan(&resources, user.id).await?;
        Ok((StatusCode::OK, Json(plan)).into_response())
    }

    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Result<Query<PlanHistoryQuery>, QueryRejection>,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;
        let Query(query) = query
            .map_err(|e| AppError::invalid_input(format!("Invalid query: {}", e.body_text())))?;

        let limit = history_limit(query.limit);
        let plans = resources.database.list_workout_plans(user.id, limit).await?;
        Ok((StatusCode::OK, Json(plans)).into_response())
    }

    async fn handle_download(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;
        let plan = Self::latest_plan(&resources, user.id).await?;

        let document = render_plan_document(&plan);
        let disposition = HeaderValue::from_str(&format!(
            "attachment; filename=\"{DOCUMENT_TITLE}.md\""
        ))
        .map_err(|e| AppError::internal(format!("Invalid Content-Disposition header: {e}")))?;

        Ok((
            StatusCode::OK,
            [
                (
                    CONTENT_TYPE,
                    HeaderValue::from_static("text/markdown; charset=utf-8"),
                ),
                (CONTENT_DISPOSITION, disposition),
            ],
            document,
        )
            .into_response())
    }
}

/// Clamp the requested history size, default when absent
fn history_limit(requested: Option<i64>) -> u32 {
    requested.map_or(DEFAULT_HISTORY_LIMIT, |limit| {
        u32::try_from(limit.clamp(1, i64::from(MAX_HISTORY_LIMIT))).unwrap_or(MAX_HISTORY_LIMIT)
    })
}

/// Markdown document served by the download route
fn render_plan_document(plan: &WorkoutPlan) -> String {
    format!(
        "# {DOCUMENT_TITLE}\n\n_Generated {} by {}_\n\n{}\n",
        plan.created_at.format("%Y-%m-%d"),
        plan.model,
        plan.content.trim_end()
    )
}
