// ABOUTME: Health check route handlers for service monitoring
// ABOUTME: Liveness answers statically, readiness pings the database and LLM provider
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! Health check routes for load balancers and orchestrators

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::warn;

use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn health_handler() -> Json<serde_json::Value> {
            Json(json!({
                "status": "healthy",
                "service": crate::constants::service_names::REPUP_SERVER,
                "version": env!("CARGO_PKG_VERSION"),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(State(resources): State<Arc<ServerResources>>) -> Response {
            let llm_configured = resources.llm_provider.is_some();
            let (database, llm) = tokio::join!(resources.database.ping(), llm_status(&resources));
            match database {
                Ok(()) => (
                    StatusCode::OK,
                    Json(json!({
                        "status": "ready",
                        "database": "ok",
                        "llm": llm,
                        "llm_configured": llm_configured,
                        "timestamp": chrono::Utc::now().to_rfc3339()
                    })),
                )
                    .into_response(),
                Err(e) => {
                    warn!(error = %e, "Readiness check failed");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        Json(json!({
                            "status": "not_ready",
                            "database": "unavailable",
                            "llm": llm,
                            "llm_configured": llm_configured,
                            "timestamp": chrono::Utc::now().to_rfc3339()
                        })),
                    )
                        .into_response()
                }
            }
        }

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}

/// Provider reachability; the LLM is optional so it never fails readiness
async fn llm_status(resources: &ServerResources) -> &'static str {
    let Some(provider) = resources.llm_provider.as_ref() else {
        return "disabled";
    };
    match provider.health_check().await {
        Ok(true) => "ok",
        Ok(false) => {
            warn!(provider = provider.name(), "LLM provider rejected health check");
            "unavailable"
        }
        Err(e) => {
            warn!(provider = provider.name(), error = %e, "LLM health check failed");
            "unavailable"
        }
    }
}
