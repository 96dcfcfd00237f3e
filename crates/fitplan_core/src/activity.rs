//! Activity-level scoring shared by every data source.

use crate::model::ActivityLevel;

const STEPS_PER_POINT: f64 = 10_000.0;
const WORKOUT_MINUTES_PER_POINT: f64 = 150.0;

/// Weighted activity score: 10k daily steps or 150 weekly workout minutes
/// each contribute one point.
pub fn score(steps: f64, workout_minutes: f64) -> f64 {
    steps / STEPS_PER_POINT + workout_minutes / WORKOUT_MINUTES_PER_POINT
}

impl ActivityLevel {
    /// Upper bounds are exclusive: a score of exactly 0.5 is Lightly Active.
    pub fn from_score(score: f64) -> Self {
        if score < 0.5 {
            ActivityLevel::Sedentary
        } else if score < 1.0 {
            ActivityLevel::LightlyActive
        } else if score < 1.5 {
            ActivityLevel::ModeratelyActive
        } else if score < 2.0 {
            ActivityLevel::VeryActive
        } else {
            ActivityLevel::ExtremelyActive
        }
    }
}

pub fn classify(steps: f64, workout_minutes: f64) -> ActivityLevel {
    ActivityLevel::from_score(score(steps, workout_minutes))
}
