//! Simulated Apple Health connector.
//!
//! Real HealthKit access needs an App Store registered app, so this returns
//! a fixed sample week after a short artificial delay.

use std::time::Duration;

use tracing::info;

use crate::FitplanError;
use crate::activity::classify;
use crate::model::{DailyAverage, DataSource, FitnessData, WeeklyTotal};

pub const DEFAULT_LATENCY: Duration = Duration::from_millis(1500);

const SAMPLE_STEPS: [u64; 7] = [8421, 9102, 7345, 10293, 8932, 12453, 6543];
const SAMPLE_CALORIES: [u64; 7] = [320, 412, 298, 450, 380, 530, 290];
const SAMPLE_WORKOUT_MINUTES: [u64; 7] = [45, 0, 60, 30, 0, 75, 0];

#[derive(Clone, Debug)]
pub struct AppleHealthConnector {
    latency: Duration,
}

impl Default for AppleHealthConnector {
    fn default() -> Self {
        Self::new(DEFAULT_LATENCY)
    }
}

impl AppleHealthConnector {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub async fn fetch(&self) -> Result<FitnessData, FitplanError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let days = SAMPLE_STEPS.len() as f64;
        let avg_steps = (SAMPLE_STEPS.iter().sum::<u64>() as f64 / days).round() as u64;
        let avg_calories = (SAMPLE_CALORIES.iter().sum::<u64>() as f64 / days).round();
        let workout_minutes = SAMPLE_WORKOUT_MINUTES.iter().sum::<u64>() as f64;

        info!(avg_steps, workout_minutes, "fetched apple health sample week");

        Ok(FitnessData {
            source: DataSource::Api,
            daily_average: DailyAverage {
                steps: avg_steps,
                calories_burned: avg_calories,
            },
            weekly_total: WeeklyTotal { workout_minutes },
            activity_level: classify(avg_steps as f64, workout_minutes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ActivityLevel;

    #[tokio::test]
    async fn sample_week_is_aggregated() {
        let data = AppleHealthConnector::new(Duration::ZERO)
            .fetch()
            .await
            .expect("fetch");
        assert_eq!(data.source, DataSource::Api);
        // 63089 / 7 = 9012.7
        assert_eq!(data.daily_average.steps, 9013);
        // 2680 / 7 = 382.86
        assert_eq!(data.daily_average.calories_burned, 383.0);
        assert_eq!(data.weekly_total.workout_minutes, 210.0);
        // 0.9013 + 1.4 = 2.3
        assert_eq!(data.activity_level, ActivityLevel::ExtremelyActive);
    }
}
