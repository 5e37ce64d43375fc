// ABOUTME: Generated workout plan model
// ABOUTME: Markdown content returned by the language model and the model that wrote it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A workout plan generated for a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutPlan {
    /// Row identifier
    pub id: i64,
    /// Owner
    #[serde(skip_serializing, default)]
    pub user_id: Uuid,
    /// Markdown plan body
    pub content: String,
    /// Model that produced the plan
    pub model: String,
    /// Generation time
    pub created_at: DateTime<Utc>,
}
