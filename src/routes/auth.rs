// ABOUTME: Authentication route handlers for sign-in, sign-out and session lookup
// ABOUTME: Registers identities returned by the sign-in provider and sets session cookies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! Authentication routes
//!
//! The identity provider's OAuth flow runs in the browser. Once it returns
//! a user, the client posts that identity to `/api/auth/login`; the server
//! records it and issues the `uid`/`uname` cookies every other route reads.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::ApiJson;
use crate::auth::authenticate_request;
use crate::constants::DEFAULT_USER_NAME;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::models::User;
use crate::resources::ServerResources;
use crate::security::cookies::{clear_session_cookies, session_cookies};

/// Identity returned by the sign-in provider
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Provider user id, minted when absent
    #[serde(default, alias = "id")]
    pub uid: Option<String>,
    /// Display name
    #[serde(default, alias = "full_name", alias = "displayName")]
    pub name: Option<String>,
    /// Email address
    #[serde(default)]
    pub email: String,
}

/// Signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// User id, also set as the `uid` cookie
    pub uid: Uuid,
    /// Display name, also set as the `uname` cookie
    pub name: String,
    /// Email address
    pub email: String,
}

impl From<User> for LoginResponse {
    fn from(user: User) -> Self {
        Self {
            uid: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Authentication routes
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/auth/login", post(Self::handle_login))
            .route("/api/auth/logout", post(Self::handle_logout))
            .route("/api/auth/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Resolve the request to an existing or new user record
    async fn resolve_user(
        resources: &ServerResources,
        request: LoginRequest,
    ) -> Result<User, AppError> {
        let email = request.email.trim().to_owned();
        if email.is_empty() {
            return Err(AppError::missing_field("Email is required"));
        }
        if !email.contains('@') {
            return Err(AppError::invalid_input("Email address is invalid"));
        }

        let (user_id, existing) =
            match request.uid.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                Some(raw) => {
                    let user_id = Uuid::parse_str(raw)
                        .map_err(|_| AppError::invalid_input("uid must be a UUID"))?;
                    (user_id, resources.database.get_user(user_id).await?)
                }
                None => match resources.database.get_user_by_email(&email).await? {
                    Some(user) => (user.id, Some(user)),
                    None => (Uuid::new_v4(), None),
                },
            };

        // A sign-in without a name keeps the one already on record
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(ToOwned::to_owned)
            .or_else(|| existing.map(|user| user.name))
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_owned());

        resources
            .database
            .upsert_user(&User::new(user_id, name, email))
            .await
    }

    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        ApiJson(request): ApiJson<LoginRequest>,
    ) -> Result<Response, AppError> {
        let user = Self::resolve_user(&resources, request).await?;
        let cookies = session_cookies(&user, &resources.config.session)?;

        AppLogger::log_auth_event(&user.id.to_string(), "login", true, None);
        info!(user_id = %user.id, "User signed in");

        let mut response = (StatusCode::OK, Json(LoginResponse::from(user))).into_response();
        for cookie in cookies {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
        Ok(response)
    }

    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
    ) -> Result<Response, AppError> {
        let cookies = clear_session_cookies(&resources.config.session)?;

        let mut response = StatusCode::NO_CONTENT.into_response();
        for cookie in cookies {
            response.headers_mut().append(SET_COOKIE, cookie);
        }
        Ok(response)
    }

    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate_request(&headers, &resources.database).await?;
        Ok((StatusCode::OK, Json(LoginResponse::from(user))).into_response())
    }
}
