// ABOUTME: User fitness details captured by the profile form
// ABOUTME: Enumerations for goal, level and split plus range validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lenient;
use crate::constants::profile_limits;
use crate::errors::{AppError, AppResult};

/// Declares a wire-string enum with a human label and `FromStr`
macro_rules! profile_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $what:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, $label:literal; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// Value as stored and sent over the wire
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }

            /// Human readable text
            #[must_use]
            pub const fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $( $wire => Ok(Self::$variant), )+
                    other => Err(AppError::invalid_input(format!(
                        "Unknown {}: {other}",
                        $what
                    ))),
                }
            }
        }
    };
}

profile_enum! {
    /// Gender selected on the profile form
    Gender, "gender" {
        /// Male
        Male => "male", "male";
        /// Female
        Female => "female", "female";
        /// Any other answer
        Other => "other", "person";
    }
}

profile_enum! {
    /// Primary training goal
    FitnessGoal, "fitness goal" {
        /// Reduce body weight
        WeightLoss => "weight_loss", "weight loss";
        /// Build muscle mass
        MuscleGain => "muscle_gain", "muscle gain";
        /// Increase maximal strength
        Strength => "strength", "strength";
        /// Improve endurance
        Endurance => "endurance", "endurance";
    }
}

profile_enum! {
    /// Self-assessed training experience
    FitnessLevel, "fitness level" {
        /// Less than a year of consistent training
        Beginner => "beginner", "beginner";
        /// Some years of consistent training
        Intermediate => "intermediate", "intermediate";
        /// Long training history
        Advanced => "advanced", "advanced";
    }
}

profile_enum! {
    /// Preferred way to split muscle groups across the week
    WorkoutSplit, "workout split" {
        /// Whole body every session
        FullBody => "full_body", "full body";
        /// Alternating upper and lower body days
        UpperLower => "upper_lower", "upper/lower";
        /// Push, pull and legs rotation
        PushPullLegs => "push_pull_legs", "push/pull/legs";
        /// One body part per day
        #[serde(alias = "body_part")]
        BroSplit => "bro_split", "bro split";
    }
}

impl WorkoutSplit {
    /// Parse a split name, accepting the `body_part` spelling of the profile form
    ///
    /// # Errors
    ///
    /// Returns `INVALID_INPUT` for unknown names
    pub fn parse_lenient(s: &str) -> AppResult<Self> {
        if s.trim().eq_ignore_ascii_case("body_part") {
            return Ok(Self::BroSplit);
        }
        s.parse()
    }
}

/// User fitness details, the input to plan generation
///
/// Serialized with snake_case keys. The profile-creation form posts camelCase
/// keys and string numbers; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessProfile {
    /// Gender
    pub gender: Gender,
    /// Age in years
    #[serde(deserialize_with = "lenient::u32")]
    pub age: u32,
    /// Height in centimetres
    #[serde(deserialize_with = "lenient::f64")]
    pub height: f64,
    /// Body weight in kilograms
    #[serde(deserialize_with = "lenient::f64")]
    pub weight: f64,
    /// Training days per week
    #[serde(alias = "activeDays", deserialize_with = "lenient::u32")]
    pub active_days: u32,
    /// Whether the user has access to gym equipment
    #[serde(alias = "hasEquipment")]
    pub has_equipment: bool,
    /// Primary goal
    pub goal: FitnessGoal,
    /// Target body weight in kilograms
    #[serde(alias = "goalWeight", deserialize_with = "lenient::f64")]
    pub goal_weight: f64,
    /// Medical conditions or injuries, `None` when there are none
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub injuries: Option<String>,
    /// Training experience
    #[serde(alias = "fitnessLevel")]
    pub fitness_level: FitnessLevel,
    /// Preferred split
    #[serde(alias = "workoutSplit")]
    pub workout_split: WorkoutSplit,
}

impl FitnessProfile {
    /// Check every numeric field against its accepted range
    ///
    /// Also normalises blank injuries to `None`, so callers should validate
    /// before storing.
    ///
    /// # Errors
    ///
    /// Returns `VALUE_OUT_OF_RANGE` naming the first offending field
    pub fn validate(&mut self) -> AppResult<()> {
        use profile_limits::{
            MAX_ACTIVE_DAYS, MAX_AGE, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_ACTIVE_DAYS, MIN_AGE,
            MIN_HEIGHT_CM, MIN_WEIGHT_KG,
        };

        if !(MIN_AGE..=MAX_AGE).contains(&self.age) {
            return Err(AppError::out_of_range(
                "age",
                format!("must be between {MIN_AGE} and {MAX_AGE}"),
            ));
        }
        check_range("height", self.height, MIN_HEIGHT_CM, MAX_HEIGHT_CM)?;
        check_range("weight", self.weight, MIN_WEIGHT_KG, MAX_WEIGHT_KG)?;
        check_range("goal_weight", self.goal_weight, MIN_WEIGHT_KG, MAX_WEIGHT_KG)?;
        if !(MIN_ACTIVE_DAYS..=MAX_ACTIVE_DAYS).contains(&self.active_days) {
            return Err(AppError::out_of_range(
                "active_days",
                format!("must be between {MIN_ACTIVE_DAYS} and {MAX_ACTIVE_DAYS}"),
            ));
        }

        if self.injuries.as_deref().is_some_and(|s| s.trim().is_empty()) {
            self.injuries = None;
        }
        Ok(())
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> AppResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AppError::out_of_range(
            field,
            format!("must be between {min} and {max}"),
        ))
    }
}
