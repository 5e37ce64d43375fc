// ABOUTME: User account model
// ABOUTME: Identity returned by the sign-in provider and stored on first login
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered `RepUp` user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier, also stored in the `uid` cookie
    pub id: Uuid,
    /// Display name, also stored in the `uname` cookie
    pub name: String,
    /// Email address, unique across users
    pub email: String,
    /// When the user first signed in
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record stamped with the current time
    #[must_use]
    pub fn new(id: Uuid, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }

    /// First word of the display name, used for greetings
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }
}
