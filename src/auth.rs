// ABOUTME: Session authentication for route handlers
// ABOUTME: Resolves the uid cookie to a stored user or rejects the request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! Cookie session authentication
//!
//! Sign-in happens at the identity provider; the server only trusts the
//! `uid` cookie it set on `/api/auth/login` and checks that the user exists.

use axum::http::HeaderMap;
use tracing::{debug, Span};
use uuid::Uuid;

use crate::constants::cookies::USER_ID;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::User;
use crate::security::cookies::get_cookie_value;

/// Authenticate a request from its session cookie
///
/// Records `user_id` on the current request span.
///
/// # Errors
///
/// Returns `AUTH_REQUIRED` when the `uid` cookie is missing, and
/// `AUTH_INVALID` when it is not a UUID or names an unknown user
pub async fn authenticate_request(headers: &HeaderMap, database: &Database) -> AppResult<User> {
    let raw = get_cookie_value(headers, USER_ID).ok_or_else(|| {
        debug!("Request without session cookie");
        AppError::auth_required()
    })?;

    let user_id = Uuid::parse_str(raw.trim()).map_err(|_| {
        AppLogger::log_auth_event(&raw, "session", false, Some("malformed uid cookie"));
        AppError::auth_invalid("Invalid session")
    })?;

    let user = database.get_user(user_id).await?.ok_or_else(|| {
        AppLogger::log_auth_event(&user_id.to_string(), "session", false, Some("unknown user"));
        AppError::auth_invalid("Invalid session").with_user_id(user_id)
    })?;

    Span::current().record("user_id", user.id.to_string());
    Ok(user)
}
