// ABOUTME: HTTP integration tests for workout plan generation and retrieval
// ABOUTME: Drives the plan routes with a scripted LLM provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use helpers::axum_test::AxumTestRequest;
use helpers::mock_llm::{MockLlmProvider, MockReply};
use repup_server::errors::ErrorCode;
use repup_server::llm::{LlmProvider, MessageRole};
use repup_server::models::{User, WorkoutPlan};
use repup_server::resources::ServerResources;
use repup_server::routes::WorkoutPlanRoutes;
use serde_json::json;

const PLAN: &str = "## Weeks 1-4\n- Squat 3x8 @ 70%\n";

fn plan_routes(resources: &Arc<ServerResources>) -> axum::Router {
    WorkoutPlanRoutes::routes(Arc::clone(resources))
}

async fn setup(provider: Option<Arc<MockLlmProvider>>) -> (Arc<ServerResources>, User) {
    let llm = provider.map(|p| p as Arc<dyn LlmProvider>);
    let resources = common::create_test_resources(llm).await.unwrap();
    let user = common::create_test_user(&resources.database).await.unwrap();
    (resources, user)
}

// ============================================================================
// POST /api/generateWorkoutPlan
// ============================================================================

#[tokio::test]
async fn test_generate_from_stored_profile() {
    let provider = Arc::new(MockLlmProvider::with_content(PLAN));
    let (resources, user) = setup(Some(Arc::clone(&provider))).await;
    resources
        .database
        .upsert_fitness_profile(user.id, &common::sample_profile())
        .await
        .unwrap();

    let response = AxumTestRequest::post("/api/generateWorkoutPlan")
        .cookie(&common::session_cookie(&user))
        .send(plan_routes(&resources))
        .await;

    assert_eq!(response.status(), 201);
    let plan: WorkoutPlan = response.json();
    assert_eq!(plan.content, PLAN.trim());
    assert_eq!(plan.model, "mock-model");

    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages.len(), 1);
    assert_eq!(requests[0].messages[0].role, MessageRole::User);
    let prompt = &requests[0].messages[0].content;
    assert!(prompt.starts_with("Generate a personalized 90-day workout plan"));
    assert!(prompt.contains("I am a 28 year old male, 180cm tall, weighing 82.5kg."));
    assert!(prompt.contains("push/pull/legs"));
    assert!(!prompt.contains("injuries"));

    let latest = resources.database.latest_workout_plan(user.id).await.unwrap().unwrap();
    assert_eq!(latest.id, plan.id);
}

#[tokio::test]
async fn test_generate_from_client_prompt() {
    let provider = Arc::new(MockLlmProvider::with_content(PLAN));
    let (resources, user) = setup(Some(Arc::clone(&provider))).await;

    let response = AxumTestRequest::post("/api/generateWorkoutPlan")
        .cookie(&common::session_cookie(&user))
        .json(&json!({"prompt": "  Write me a plan  "}))
        .send(plan_routes(&resources))
        .await;

    assert_eq!(response.status(), 201);
    assert_eq!(provider.requests()[0].messages[0].content, "Write me a plan");
}

#[tokio::test]
async fn test_generate_from_inline_profile_with_injuries() {
    let provider = Arc::new(MockLlmProvider::with_content(PLAN));
    let (resources, user) = setup(Some(Arc::clone(&provider))).await;

    let mut profile = serde_json::to_value(common::sample_profile()).unwrap();
    profile["injuries"] = json!("lower back pain");

    let response = AxumTestRequest::post("/api/generateWorkoutPlan")
        .cookie(&common::session_cookie(&user))
        .json(&json!({"profile": profile}))
        .send(plan_routes(&resources))
        .await;

    assert_eq!(response.status(), 201);
    let prompt = provider.requests()[0].messages[0].content.clone();
    assert!(prompt.contains("lower back pain"));
}

#[tokio::test]
async fn test_generate_without_profile_is_missing_field() {
    let provider = Arc::new(MockLlmProvider::with_content(PLAN));
    let (resources, user) = setup(Some(Arc::clone(&provider))).await;

    let response = AxumTestRequest::post("/api/generateWorkoutPlan")
        .cookie(&common::session_cookie(&user))
        .send(plan_routes(&resources))
        .await;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "MISSING_REQUIRED_FIELD");
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_generate_rejects_oversized_prompt() {
    let provider = Arc::new(MockLlmProvider::with_content(PLAN));
    let (resources, user) = setup(Some(Arc::clone(&provider))).await;

    let response = AxumTestRequest::post("/api/generateWorkoutPlan")
        .cookie(&common::session_cookie(&user))
        .json(&json!({"prompt": "x".repeat(8001)}))
        .send(plan_routes(&resources))
        .await;

    assert_eq!(response.status(), 400);
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn test_generate_without_llm_is_unavailable() {
    let (resources, user) = setup(None).await;

    let response = AxumTestRequest::post("/api/generateWorkoutPlan")
        .cookie(&common::session_cookie(&user))
        .json(&json!({"prompt": "plan please"}))
        .send(plan_routes(&resources))
        .await;

    assert_eq!(response.status(), 503);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "CONFIG_MISSING");
}

#[tokio::test]
async fn test_generate_with_empty_completion_is_bad_gateway() {
    let provider = Arc::new(MockLlmProvider::with_content("   \n"));
    let (resources, user) = setup(Some(provider)).await;

    let response = AxumTestRequest::post("/api/generateWorkoutPlan")
        .cookie(&common::session_cookie(&user))
        .json(&json!({"prompt": "plan please"}))
        .send(plan_routes(&resources))
        .await;

    assert_eq!(response.status(), 502);
    assert!(resources.database.latest_workout_plan(user.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_generate_passes_through_provider_errors() {
    let provider = Arc::new(MockLlmProvider::new([MockReply::Error(
        ErrorCode::ExternalRateLimited,
        "Groq: rate limited".to_owned(),
    )]));
    let (resources, user) = setup(Some(provider)).await;

    let response = AxumTestRequest::post("/api/generateWorkoutPlan")
        .cookie(&common::session_cookie(&user))
        .json(&json!({"prompt": "plan please"}))
        .send(plan_routes(&resources))
        .await;

    assert_eq!(response.status(), 429);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "EXTERNAL_RATE_LIMITED");
}

#[tokio::test]
async fn test_generate_requires_session() {
    let provider = Arc::new(MockLlmProvider::with_content(PLAN));
    let (resources, _user) = setup(Some(provider)).await;

    let response = AxumTestRequest::post("/api/generateWorkoutPlan")
        .json(&json!({"prompt": "plan please"}))
        .send(plan_routes(&resources))
        .await;

    assert_eq!(response.status(), 401);
}

// ============================================================================
// GET /api/workoutPlan, /api/workoutPlans, /api/workoutPlan/download
// ============================================================================

#[tokio::test]
async fn test_latest_plan_not_found_then_found() {
    let (resources, user) = setup(None).await;
    let cookie = common::session_cookie(&user);

    let missing = AxumTestRequest::get("/api/workoutPlan")
        .cookie(&cookie)
        .send(plan_routes(&resources))
        .await;
    assert_eq!(missing.status(), 404);

    resources
        .database
        .insert_workout_plan(user.id, "first", "m")
        .await
        .unwrap();
    resources
        .database
        .insert_workout_plan(user.id, "second", "m")
        .await
        .unwrap();

    let plan: WorkoutPlan = AxumTestRequest::get("/api/workoutPlan")
        .cookie(&cookie)
        .send(plan_routes(&resources))
        .await
        .json();
    assert_eq!(plan.content, "second");
}

#[tokio::test]
async fn test_plan_history_limit() {
    let (resources, user) = setup(None).await;
    let cookie = common::session_cookie(&user);
    for i in 0..4 {
        resources
            .database
            .insert_workout_plan(user.id, &format!("plan {i}"), "m")
            .await
            .unwrap();
    }

    let all: Vec<WorkoutPlan> = AxumTestRequest::get("/api/workoutPlans")
        .cookie(&cookie)
        .send(plan_routes(&resources))
        .await
        .json();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].content, "plan 3");

    let two: Vec<WorkoutPlan> = AxumTestRequest::get("/api/workoutPlans?limit=2")
        .cookie(&cookie)
        .send(plan_routes(&resources))
        .await
        .json();
    assert_eq!(two.len(), 2);

    let clamped: Vec<WorkoutPlan> = AxumTestRequest::get("/api/workoutPlans?limit=0")
        .cookie(&cookie)
        .send(plan_routes(&resources))
        .await
        .json();
    assert_eq!(clamped.len(), 1);

    let invalid = AxumTestRequest::get("/api/workoutPlans?limit=lots")
        .cookie(&cookie)
        .send(plan_routes(&resources))
        .await;
    assert_eq!(invalid.status(), 400);
}

#[tokio::test]
async fn test_download_plan_as_markdown() {
    let (resources, user) = setup(None).await;
    resources
        .database
        .insert_workout_plan(user.id, PLAN, "llama3-8b-8192")
        .await
        .unwrap();

    let response = AxumTestRequest::get("/api/workoutPlan/download")
        .cookie(&common::session_cookie(&user))
        .send(plan_routes(&resources))
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("content-type").as_deref(),
        Some("text/markdown; charset=utf-8")
    );
    assert_eq!(
        response.header("content-disposition").as_deref(),
        Some("attachment; filename=\"RepUp Workout Plan.md\"")
    );
    let document = response.text();
    assert!(document.starts_with("# RepUp Workout Plan\n"));
    assert!(document.contains("- Squat 3x8 @ 70%"));
}

#[tokio::test]
async fn test_plans_are_isolated_per_user() {
    let (resources, owner) = setup(None).await;
    let other = common::create_test_user_with_email(&resources.database, "other@example.com")
        .await
        .unwrap();
    resources
        .database
        .insert_workout_plan(owner.id, PLAN, "m")
        .await
        .unwrap();

    let response = AxumTestRequest::get("/api/workoutPlan")
        .cookie(&common::session_cookie(&other))
        .send(plan_routes(&resources))
        .await;
    assert_eq!(response.status(), 404);
}
