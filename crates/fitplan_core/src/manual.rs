//! Manually entered averages.

use serde::{Deserialize, Serialize};

use crate::FitplanError;
use crate::activity::classify;
use crate::model::{DailyAverage, DataSource, FitnessData, WeeklyTotal};

pub const MAX_DAILY_STEPS: f64 = 100_000.0;
pub const MAX_DAILY_CALORIES: f64 = 10_000.0;
/// Minutes in a week.
pub const MAX_WEEKLY_WORKOUT_MINUTES: f64 = 10_080.0;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntry {
    pub avg_steps: f64,
    pub avg_calories_burned: f64,
    pub weekly_workout_minutes: f64,
}

fn check_range(field: &str, value: f64, max: f64) -> Result<(), FitplanError> {
    if !value.is_finite() || value < 0.0 {
        return Err(FitplanError::Validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    if value > max {
        return Err(FitplanError::Validation(format!(
            "{field} must not exceed {max}"
        )));
    }
    Ok(())
}

impl ManualEntry {
    pub fn validate(&self) -> Result<(), FitplanError> {
        check_range("avgSteps", self.avg_steps, MAX_DAILY_STEPS)?;
        check_range(
            "avgCaloriesBurned",
            self.avg_calories_burned,
            MAX_DAILY_CALORIES,
        )?;
        check_range(
            "weeklyWorkoutMinutes",
            self.weekly_workout_minutes,
            MAX_WEEKLY_WORKOUT_MINUTES,
        )
    }

    /// Validate and label the entry. Steps are rounded to whole steps before scoring.
    pub fn into_fitness_data(self) -> Result<FitnessData, FitplanError> {
        self.validate()?;
        let steps = self.avg_steps.round() as u64;
        Ok(FitnessData {
            source: DataSource::Manual,
            daily_average: DailyAverage {
                steps,
                calories_burned: self.avg_calories_burned,
            },
            weekly_total: WeeklyTotal {
                workout_minutes: self.weekly_workout_minutes,
            },
            activity_level: classify(steps as f64, self.weekly_workout_minutes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivityLevel;

    fn entry(steps: f64, calories: f64, minutes: f64) -> ManualEntry {
        ManualEntry {
            avg_steps: steps,
            avg_calories_burned: calories,
            weekly_workout_minutes: minutes,
        }
    }

    #[test]
    fn converts_with_shared_scorer() {
        let data = entry(5000.0, 320.0, 75.0)
            .into_fitness_data()
            .expect("valid entry");
        assert_eq!(data.source, DataSource::Manual);
        assert_eq!(data.daily_average.steps, 5000);
        assert_eq!(data.activity_level, ActivityLevel::ModeratelyActive);
    }

    #[test]
    fn accepts_bounds_inclusive() {
        assert!(entry(0.0, 0.0, 0.0).validate().is_ok());
        assert!(
            entry(MAX_DAILY_STEPS, MAX_DAILY_CALORIES, MAX_WEEKLY_WORKOUT_MINUTES)
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn rejects_negative_excessive_and_nan() {
        assert!(entry(-1.0, 0.0, 0.0).validate().is_err());
        assert!(entry(0.0, 10_001.0, 0.0).validate().is_err());
        assert!(entry(0.0, 0.0, 10_081.0).validate().is_err());
        assert!(entry(f64::NAN, 0.0, 0.0).validate().is_err());
    }

    #[test]
    fn nan_message_allows_zero() {
        let err = entry(0.0, f64::NAN, 0.0).validate().expect_err("nan");
        assert_eq!(
            err.to_string(),
            "validation error: avgCaloriesBurned must be a non-negative number"
        );
    }

    #[test]
    fn deserializes_form_payload() {
        let e: ManualEntry = serde_json::from_str(
            r#"{"avgSteps": 7200, "avgCaloriesBurned": 410.5, "weeklyWorkoutMinutes": 90}"#,
        )
        .expect("payload");
        assert_eq!(e, entry(7200.0, 410.5, 90.0));
    }
}
