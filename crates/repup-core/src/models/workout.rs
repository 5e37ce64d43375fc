// ABOUTME: Logged workout sessions and their exercises
// ABOUTME: Maps between the tracker page payload and the stored row shape
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lenient;
use crate::constants::workout_limits::{
    MAX_DURATION_HOURS, MAX_EXERCISES, MAX_NAME_LEN, MAX_YEAR, MIN_YEAR,
};
use crate::errors::{AppError, AppResult};

/// One exercise inside a workout session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Exercise name, e.g. "Bench Press"
    #[serde(alias = "exerciseName", alias = "name")]
    pub exercise_name: String,
    /// Number of sets
    #[serde(deserialize_with = "lenient::u32")]
    pub sets: u32,
    /// Repetitions per set
    #[serde(deserialize_with = "lenient::u32")]
    pub reps: u32,
    /// Load in kilograms, zero for bodyweight
    #[serde(default, deserialize_with = "lenient::f64")]
    pub weight: f64,
}

impl Exercise {
    /// Training volume: sets × reps × weight
    #[must_use]
    pub fn volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight
    }
}

/// A workout session as posted by the tracker page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewWorkoutSession {
    /// Session name
    #[serde(default)]
    pub name: String,
    /// Calendar date, today when omitted
    #[serde(default, deserialize_with = "lenient::optional_date")]
    pub date: Option<NaiveDate>,
    /// Duration in hours
    #[serde(deserialize_with = "lenient::f64")]
    pub duration: f64,
    /// Exercises performed
    #[serde(rename = "Exercises", alias = "exercises", default)]
    pub exercises: Vec<Exercise>,
}

impl NewWorkoutSession {
    /// Check the session and trim its names
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` for a blank name or no exercises,
    /// `VALUE_OUT_OF_RANGE` for an invalid date, duration or weight and
    /// `INVALID_INPUT` for oversized names or lists
    pub fn validate(&mut self) -> AppResult<()> {
        self.name = self.name.trim().to_owned();
        if self.name.is_empty() {
            return Err(AppError::missing_field("Workout name is required"));
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(AppError::invalid_input(format!(
                "Workout name must be at most {MAX_NAME_LEN} characters"
            )));
        }

        if let Some(date) = self.date {
            if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
                return Err(AppError::out_of_range(
                    "date",
                    format!("year must be between {MIN_YEAR} and {MAX_YEAR}"),
                ));
            }
        }

        if !(self.duration > 0.0 && self.duration <= MAX_DURATION_HOURS) {
            return Err(AppError::out_of_range(
                "duration",
                format!("must be greater than 0 and at most {MAX_DURATION_HOURS} hours"),
            ));
        }

        if self.exercises.is_empty() {
            return Err(AppError::missing_field(
                "At least one exercise is required",
            ));
        }
        if self.exercises.len() > MAX_EXERCISES {
            return Err(AppError::invalid_input(format!(
                "A workout can contain at most {MAX_EXERCISES} exercises"
            )));
        }

        for (index, exercise) in self.exercises.iter_mut().enumerate() {
            exercise.exercise_name = exercise.exercise_name.trim().to_owned();
            if exercise.exercise_name.is_empty() {
                return Err(AppError::missing_field(format!(
                    "Exercise {} is missing a name",
                    index + 1
                )));
            }
            if exercise.exercise_name.chars().count() > MAX_NAME_LEN {
                return Err(AppError::invalid_input(format!(
                    "Exercise {} name must be at most {MAX_NAME_LEN} characters",
                    index + 1
                )));
            }
            if exercise.weight < 0.0 {
                return Err(AppError::out_of_range("weight", "must not be negative"));
            }
        }

        Ok(())
    }

    /// Session date, falling back to today (UTC)
    #[must_use]
    pub fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Utc::now().date_naive())
    }
}

/// A stored workout session, in the shape the client renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSession {
    /// Row identifier
    pub id: i64,
    /// Owner
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    /// Session name
    pub name: String,
    /// Calendar date
    pub date: NaiveDate,
    /// Duration in hours
    pub duration: f64,
    /// Exercises performed
    #[serde(rename = "Exercises")]
    pub exercises: Vec<Exercise>,
}

impl WorkoutSession {
    /// Sum of the volume of every exercise
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        self.exercises.iter().map(Exercise::volume).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::json;

    fn tracker_payload() -> serde_json::Value {
        json!({
            "name": "  Push Day ",
            "date": "2024-05-02",
            "duration": "1.5",
            "Exercises": [
                { "exercise_name": "Bench Press", "sets": "4", "reps": "8", "weight": "80" },
                { "exercise_name": "Push Up", "sets": 3, "reps": 15, "weight": 0 }
            ]
        })
    }

    #[test]
    fn test_tracker_payload() {
        let mut session: NewWorkoutSession = serde_json::from_value(tracker_payload()).unwrap();
        session.validate().unwrap();

        assert_eq!(session.name, "Push Day");
        assert_eq!(session.exercises.len(), 2);
        assert!((session.exercises[0].volume() - 2560.0).abs() < f64::EPSILON);
        assert_eq!(session.date_or_today(), NaiveDate::from_ymd_opt(2024, 5, 2).unwrap());
    }

    #[test]
    fn test_missing_date_defaults_to_today() {
        let mut payload = tracker_payload();
        payload["date"] = json!("");
        let session: NewWorkoutSession = serde_json::from_value(payload).unwrap();

        assert_eq!(session.date, None);
        assert_eq!(session.date_or_today(), Utc::now().date_naive());
    }

    #[test]
    fn test_duration_bounds() {
        for bad in [json!(0), json!(-1), json!(24.5)] {
            let mut payload = tracker_payload();
            payload["duration"] = bad;
            let mut session: NewWorkoutSession = serde_json::from_value(payload).unwrap();
            let err = session.validate().unwrap_err();
            assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        }
    }

    #[test]
    fn test_date_year_bounds() {
        for bad in ["+10000-01-01", "1899-12-31"] {
            let mut payload = tracker_payload();
            payload["date"] = json!(bad);
            let mut session: NewWorkoutSession = serde_json::from_value(payload).unwrap();
            let err = session.validate().unwrap_err();
            assert_eq!(err.code, ErrorCode::ValueOutOfRange, "{bad}");
            assert_eq!(err.context.details["field"], "date");
        }

        let mut payload = tracker_payload();
        payload["date"] = json!("9999-12-31");
        let mut session: NewWorkoutSession = serde_json::from_value(payload).unwrap();
        session.validate().unwrap();
    }

    #[test]
    fn test_requires_exercises() {
        let mut payload = tracker_payload();
        payload["Exercises"] = json!([]);
        let mut session: NewWorkoutSession = serde_json::from_value(payload).unwrap();

        let err = session.validate().unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn test_rejects_unnamed_exercise() {
        let mut payload = tracker_payload();
        payload["Exercises"][1]["exercise_name"] = json!("   ");
        let mut session: NewWorkoutSession = serde_json::from_value(payload).unwrap();

        let err = session.validate().unwrap_err();
        assert!(err.message.contains("Exercise 2"));
    }

    #[test]
    fn test_session_serializes_client_shape() {
        let session = WorkoutSession {
            id: 7,
            user_id: Uuid::nil(),
            name: "Legs".into(),
            date: NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            duration: 1.0,
            exercises: vec![Exercise {
                exercise_name: "Squat".into(),
                sets: 5,
                reps: 5,
                weight: 100.0,
            }],
        };

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["userId"], Uuid::nil().to_string());
        assert_eq!(value["date"], "2024-01-03");
        assert_eq!(value["Exercises"][0]["exercise_name"], "Squat");
        assert!((session.total_volume() - 2500.0).abs() < f64::EPSILON);
    }
}
