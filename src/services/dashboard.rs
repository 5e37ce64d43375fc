// ABOUTME: Dashboard summary for the signed-in user
// ABOUTME: Combines the user, workout totals, fitness goal and plan status
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use crate::database::Database;
use crate::errors::AppResult;
use crate::models::User;

/// Dashboard cards, in the shape the client's `UserInfo` type expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    /// User id
    pub uid: Uuid,
    /// First name, used in the greeting
    pub name: String,
    /// Email address
    pub email: String,
    /// Full display name
    pub full_name: String,
    /// Date of the most recent session
    pub last_workout: Option<NaiveDate>,
    /// Number of logged sessions
    pub total_workouts: i64,
    /// Goal label from the fitness profile
    pub fitness_goal: Option<String>,
    /// Whether a plan has been generated
    pub has_workout_plan: bool,
}

/// Collect the dashboard summary for `user`
///
/// # Errors
///
/// Returns an error if any of the underlying queries fail
pub async fn build_user_info(database: &Database, user: &User) -> AppResult<UserInfo> {
    let (latest, total, profile, plan) = tokio::try_join!(
        database.latest_workout_session(user.id),
        database.count_workout_sessions(user.id),
        database.get_fitness_profile(user.id),
        database.latest_workout_plan(user.id),
    )?;

    Ok(UserInfo {
        uid: user.id,
        name: user.first_name().to_owned(),
        email: user.email.clone(),
        full_name: user.name.clone(),
        last_workout: latest.map(|session| session.date),
        total_workouts: total,
        fitness_goal: profile.map(|p| p.goal.label().to_owned()),
        has_workout_plan: plan.is_some(),
    })
}
