// ABOUTME: Training progress aggregation over logged workout sessions
// ABOUTME: Groups sessions per calendar day into sessions, hours and volume
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 RepUp Fitness

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::WorkoutSession;

/// Training totals for one calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPoint {
    /// Calendar day
    pub date: NaiveDate,
    /// Sessions logged that day
    pub sessions: u32,
    /// Hours trained that day
    pub duration_hours: f64,
    /// Sum of sets × reps × weight that day
    pub volume: f64,
}

/// Progress points in ascending date order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSeries {
    /// One point per day with at least one session
    pub points: Vec<ProgressPoint>,
}

/// Aggregate sessions into one point per day, oldest first
#[must_use]
pub fn build_progress(sessions: &[WorkoutSession]) -> ProgressSeries {
    let mut days: BTreeMap<NaiveDate, ProgressPoint> = BTreeMap::new();

    for session in sessions {
        let point = days.entry(session.date).or_insert_with(|| ProgressPoint {
            date: session.date,
            sessions: 0,
            duration_hours: 0.0,
            volume: 0.0,
        });
        point.sessions += 1;
        point.duration_hours += session.duration;
        point.volume += session.total_volume();
    }

    ProgressSeries {
        points: days.into_values().collect(),
    }
}
