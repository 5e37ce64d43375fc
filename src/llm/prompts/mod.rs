// ABOUTME: Prompt templates for LLM interactions
// ABOUTME: Renders the 90-day workout plan prompt from a user's fitness details
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

//! # Prompts
//!
//! The fixed requirements block is loaded at compile time from markdown so it
//! can be edited without touching code.

use std::fmt::Write as _;

use crate::models::FitnessProfile;

/// Requirements and closing note appended to every workout plan prompt
pub const WORKOUT_PLAN_REQUIREMENTS: &str = include_str!("workout_plan_requirements.md");

/// Render the workout plan prompt for `profile`
///
/// The injuries sentence is left out when the profile has none.
#[must_use]
pub fn build_workout_plan_prompt(profile: &FitnessProfile) -> String {
    let mut prompt = String::from("Generate a personalized 90-day workout plan based on my profile:\n\n");

    let _ = write!(
        prompt,
        "I am a {age} year old {gender}, {height}cm tall, weighing {weight}kg. ",
        age = profile.age,
        gender = profile.gender.label(),
        height = format_number(profile.height),
        weight = format_number(profile.weight),
    );
    prompt.push_str(if profile.has_equipment {
        "I have access to a fully equipped gym. "
    } else {
        "I have no gym equipment. "
    });
    let _ = write!(
        prompt,
        "I can work out {days} days per week. My goal is {goal} with a target weight of {target}kg. \
         My fitness level is {level}. ",
        days = profile.active_days,
        goal = profile.goal.label(),
        target = format_number(profile.goal_weight),
        level = profile.fitness_level.label(),
    );
    if let Some(injuries) = profile.injuries.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let _ = write!(
            prompt,
            "I have the following medical conditions/injuries to consider: {}. ",
            injuries.trim_end_matches('.')
        );
    }
    let _ = write!(
        prompt,
        "I prefer a {} workout split.\n\n",
        profile.workout_split.label()
    );

    prompt.push_str(WORKOUT_PLAN_REQUIREMENTS.trim_end());
    prompt
}

/// Whole numbers without a trailing `.0`, others as given
fn format_number(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}
