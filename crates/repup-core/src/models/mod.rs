// ABOUTME: Core data models for the RepUp fitness tracker
// ABOUTME: Re-exports users, fitness profiles, workout sessions and workout plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! # Data Models
//!
//! The browser client and the database disagree on field names in a few
//! places (`activeDays` vs `active_days`, `Exercises` vs `exercises`,
//! `workout_id` vs `id`). The models here accept the client spelling on input
//! and produce the shape the client expects on output, so handlers never
//! rename fields by hand.

mod plan;
mod profile;
mod user;
mod workout;

/// Lenient deserializers for values posted from HTML forms
pub mod lenient;

pub use plan::WorkoutPlan;
pub use profile::{FitnessGoal, FitnessLevel, FitnessProfile, Gender, WorkoutSplit};
pub use user::User;
pub use workout::{Exercise, NewWorkoutSession, WorkoutSession};
