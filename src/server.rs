// ABOUTME: HTTP server assembly and lifecycle
// ABOUTME: Merges route groups, applies middleware and serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! # Server
//!
//! Middleware order, outermost first: request id, tracing span, request id
//! propagation, CORS, timeout, body limit.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderName, Request, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Span};

use crate::constants::headers::REQUEST_ID;
use crate::errors::{AppError, AppResult};
use crate::middleware::{create_request_span, record_response, setup_cors, MakeRequestUuid};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, DashboardRoutes, HealthRoutes, ProfileRoutes, WorkoutPlanRoutes, WorkoutRoutes,
};

/// Build the complete application router
#[must_use]
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let http_config = &resources.config.http;
    let request_id_header = HeaderName::from_static(REQUEST_ID);

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| create_request_span(request))
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    record_response(response.status(), latency, span);
                }),
        )
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(setup_cors(http_config))
        .layer(TimeoutLayer::new(Duration::from_secs(
            http_config.request_timeout_secs,
        )));

    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(AuthRoutes::routes(Arc::clone(&resources)))
        .merge(ProfileRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutRoutes::routes(Arc::clone(&resources)))
        .merge(WorkoutPlanRoutes::routes(Arc::clone(&resources)))
        .merge(DashboardRoutes::routes(Arc::clone(&resources)))
        .layer(DefaultBodyLimit::max(http_config.max_body_bytes))
        .layer(middleware)
}

/// Bind `host:port` and serve until Ctrl-C or SIGTERM
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn run(resources: Arc<ServerResources>, host: &str, port: u16) -> AppResult<()> {
    let router = build_router(Arc::clone(&resources));

    let listener = TcpListener::bind((host, port))
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {host}:{port}: {e}")))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| AppError::internal(format!("Failed to read bound address: {e}")))?;
    info!("HTTP server listening on http://{local_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("HTTP server failed: {e}")))?;

    resources.database.close().await;
    info!("HTTP server stopped");
    Ok(())
}

/// Resolve when the process is asked to stop
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl-C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
