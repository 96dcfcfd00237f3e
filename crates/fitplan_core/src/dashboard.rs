//! Dashboard read models derived from a user's stored [`FitnessData`].
//!
//! Only one averaged week is kept per user, so the day-by-day series is a
//! fixed spread around the daily average, not recorded history.

use serde::{Deserialize, Serialize};

use crate::model::{ActivityLevel, FitnessData};

pub const PROGRESS_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const DAY_FACTORS: [f64; 7] = [0.8, 1.1, 1.2, 0.9, 1.0, 1.3, 0.85];
const AVERAGE_FACTOR: f64 = 1.02;
const GOAL_FACTOR: f64 = 1.1;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryStats {
    pub avg_steps: u64,
    /// Week-over-week change in percent; `None` without an earlier week.
    pub steps_change: Option<f64>,
    pub activity_level: ActivityLevel,
    pub active_minutes: f64,
    pub minutes_change: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DataSummary {
    pub stats: SummaryStats,
    pub text: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProgressSeries {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub average: u64,
    pub goal: u64,
    /// `average / goal` in percent, one decimal.
    pub progress: f64,
}

fn advice(level: ActivityLevel) -> &'static str {
    match level {
        ActivityLevel::Sedentary => {
            "Short daily walks and two or three brief workouts a week are the quickest way to build momentum."
        }
        ActivityLevel::LightlyActive => {
            "Adding a few structured workouts each week would move you into a moderately active range."
        }
        ActivityLevel::ModeratelyActive => {
            "You are keeping a steady routine; mixing cardio with strength training will keep progress coming."
        }
        ActivityLevel::VeryActive => {
            "Your volume is high, so plan recovery days alongside your harder sessions."
        }
        ActivityLevel::ExtremelyActive => {
            "You train a lot; prioritize sleep, hydration and at least one full rest day a week."
        }
    }
}

pub fn summarize(data: &FitnessData) -> DataSummary {
    let steps = data.daily_average.steps;
    let minutes = data.weekly_total.workout_minutes;
    let level = data.activity_level;
    DataSummary {
        stats: SummaryStats {
            avg_steps: steps,
            steps_change: None,
            activity_level: level,
            active_minutes: minutes,
            minutes_change: None,
        },
        text: format!(
            "You average {steps} steps a day with {minutes:.0} workout minutes a week, \
             which puts you at {level}. {}",
            advice(level)
        ),
    }
}

fn scaled(steps: u64, factor: f64) -> u64 {
    (steps as f64 * factor).round() as u64
}

pub fn progress(data: &FitnessData) -> ProgressSeries {
    let steps = data.daily_average.steps;
    let average = scaled(steps, AVERAGE_FACTOR);
    let goal = scaled(steps, GOAL_FACTOR);
    let progress = if goal == 0 {
        0.0
    } else {
        (average as f64 / goal as f64 * 1000.0).round() / 10.0
    };
    ProgressSeries {
        labels: PROGRESS_LABELS.iter().map(|l| l.to_string()).collect(),
        values: DAY_FACTORS.iter().map(|f| scaled(steps, *f)).collect(),
        average,
        goal,
        progress,
    }
}
