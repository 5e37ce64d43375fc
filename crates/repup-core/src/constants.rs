// ABOUTME: Shared constants for validation bounds and user-facing literals
// ABOUTME: Keeps range checks for profiles and workouts in one place
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

/// Bounds applied to fitness profile fields
pub mod profile_limits {
    /// Youngest accepted age in years
    pub const MIN_AGE: u32 = 1;
    /// Oldest accepted age in years
    pub const MAX_AGE: u32 = 120;
    /// Shortest accepted height in centimetres
    pub const MIN_HEIGHT_CM: f64 = 50.0;
    /// Tallest accepted height in centimetres
    pub const MAX_HEIGHT_CM: f64 = 300.0;
    /// Lightest accepted body weight in kilograms (current and goal)
    pub const MIN_WEIGHT_KG: f64 = 20.0;
    /// Heaviest accepted body weight in kilograms (current and goal)
    pub const MAX_WEIGHT_KG: f64 = 500.0;
    /// Minimum training days per week
    pub const MIN_ACTIVE_DAYS: u32 = 1;
    /// Maximum training days per week
    pub const MAX_ACTIVE_DAYS: u32 = 7;
}

/// Bounds applied to logged workout sessions
pub mod workout_limits {
    /// Longest accepted session, in hours
    pub const MAX_DURATION_HOURS: f64 = 24.0;
    /// Longest accepted session or exercise name
    pub const MAX_NAME_LEN: usize = 200;
    /// Maximum number of exercises in a single session
    pub const MAX_EXERCISES: usize = 100;
    /// Earliest accepted session year
    pub const MIN_YEAR: i32 = 1900;
    /// Latest accepted session year, keeps stored dates four digits wide
    pub const MAX_YEAR: i32 = 9999;
}

/// Display name used when the identity provider returns none
pub const DEFAULT_USER_NAME: &str = "Unknown User";
