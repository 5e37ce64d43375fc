// ABOUTME: Domain services composed from database queries
// ABOUTME: Dashboard summary and training progress aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

/// Dashboard summary for the signed-in user
pub mod dashboard;
/// Per-day training progress series
pub mod progress;

pub use dashboard::{build_user_info, UserInfo};
pub use progress::{build_progress, ProgressPoint, ProgressSeries};
