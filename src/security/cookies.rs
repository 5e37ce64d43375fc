// ABOUTME: Session cookie encoding and parsing
// ABOUTME: Builds the uid/uname Set-Cookie headers and reads them back from requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! Session cookies
//!
//! The browser client reads `uname` from `document.cookie` to greet the
//! user, so neither cookie is `HttpOnly`. Values are percent-encoded.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};

use crate::config::SessionConfig;
use crate::constants::cookies::{USER_ID, USER_NAME};
use crate::errors::{AppError, AppResult};
use crate::models::User;

const SECONDS_PER_DAY: u64 = 86_400;

/// Read a cookie value from the request headers, percent-decoded
///
/// Returns `None` when the cookie is absent or empty.
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| {
            urlencoding::decode(value).map_or_else(|_| value.to_owned(), |v| v.into_owned())
        })
}

/// `Set-Cookie` values establishing a session for `user`
///
/// # Errors
///
/// Returns an error if a header value cannot be built
pub fn session_cookies(user: &User, config: &SessionConfig) -> AppResult<[HeaderValue; 2]> {
    let max_age = u64::from(config.cookie_days) * SECONDS_PER_DAY;
    Ok([
        build_cookie(USER_ID, &user.id.to_string(), max_age, config.cookie_secure)?,
        build_cookie(USER_NAME, &user.name, max_age, config.cookie_secure)?,
    ])
}

/// `Set-Cookie` values expiring both session cookies
///
/// # Errors
///
/// Returns an error if a header value cannot be built
pub fn clear_session_cookies(config: &SessionConfig) -> AppResult<[HeaderValue; 2]> {
    Ok([
        build_cookie(USER_ID, "", 0, config.cookie_secure)?,
        build_cookie(USER_NAME, "", 0, config.cookie_secure)?,
    ])
}

fn build_cookie(name: &str, value: &str, max_age: u64, secure: bool) -> AppResult<HeaderValue> {
    let mut cookie = format!(
        "{name}={}; Path=/; Max-Age={max_age}; SameSite=Lax",
        urlencoding::encode(value)
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::internal(format!("Invalid cookie header for {name}: {e}")))
}
