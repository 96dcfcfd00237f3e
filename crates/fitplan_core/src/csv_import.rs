//! CSV aggregation of exported daily activity rows.
//!
//! Exports from different apps disagree on column names, so each metric is
//! looked up through an ordered list of synonyms. Unreadable cells are
//! skipped per field; only a file without a single usable step value fails.

use std::collections::HashMap;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::FitplanError;
use crate::activity::classify;
use crate::model::{DailyAverage, DataSource, FitnessData, WeeklyTotal};

/// Step-count columns, highest priority first. Matching is case-sensitive.
pub const STEP_COLUMNS: [&str; 4] = ["steps", "step_count", "Steps", "StepCount"];
pub const CALORIE_COLUMNS: [&str; 4] = ["calories", "calorie_burn", "Calories", "CaloriesBurned"];
pub const WORKOUT_MINUTE_COLUMNS: [&str; 4] = [
    "workout_minutes",
    "active_minutes",
    "WorkoutMinutes",
    "ActivityMinutes",
];

/// Column positions for one metric, in synonym priority order.
struct ColumnProbe {
    indices: Vec<usize>,
}

impl ColumnProbe {
    fn new(header_index: &HashMap<&str, usize>, synonyms: &[&str]) -> Self {
        let indices = synonyms
            .iter()
            .filter_map(|name| header_index.get(name).copied())
            .collect();
        Self { indices }
    }

    /// First synonym whose cell holds a usable number.
    fn value(&self, record: &StringRecord) -> Option<f64> {
        self.indices
            .iter()
            .filter_map(|&i| record.get(i))
            .find_map(parse_metric)
    }
}

fn parse_metric(cell: &str) -> Option<f64> {
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

#[derive(Debug, Default)]
struct Totals {
    steps: f64,
    calories: f64,
    workout_minutes: f64,
    valid_days: u32,
}

/// Aggregate raw upload bytes. Non-UTF-8 input is malformed.
pub fn aggregate_csv_bytes(bytes: &[u8]) -> Result<FitnessData, FitplanError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| FitplanError::MalformedInput(format!("file is not valid UTF-8: {e}")))?;
    aggregate_csv(text)
}

/// Aggregate CSV text into daily averages and a weekly workout total.
pub fn aggregate_csv(text: &str) -> Result<FitnessData, FitplanError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| FitplanError::MalformedInput(e.to_string()))?
        .clone();
    // Later duplicates shadow earlier ones, like keying a row by header name.
    let header_index: HashMap<&str, usize> =
        headers.iter().enumerate().map(|(i, h)| (h, i)).collect();

    let steps = ColumnProbe::new(&header_index, &STEP_COLUMNS);
    let calories = ColumnProbe::new(&header_index, &CALORIE_COLUMNS);
    let minutes = ColumnProbe::new(&header_index, &WORKOUT_MINUTE_COLUMNS);

    let mut totals = Totals::default();
    let mut rows = 0usize;
    for record in reader.records() {
        let record = record.map_err(|e| FitplanError::MalformedInput(e.to_string()))?;
        rows += 1;

        if let Some(v) = steps.value(&record) {
            totals.steps += v;
            totals.valid_days += 1;
        }
        if let Some(v) = calories.value(&record) {
            totals.calories += v;
        }
        if let Some(v) = minutes.value(&record) {
            totals.workout_minutes += v;
        }
    }

    debug!(rows, valid_days = totals.valid_days, "aggregated csv rows");

    if totals.valid_days == 0 {
        return Err(FitplanError::NoValidData(
            "could not find valid step count data in the CSV file".into(),
        ));
    }

    let days = f64::from(totals.valid_days);
    let avg_steps = (totals.steps / days).round() as u64;
    let avg_calories = (totals.calories / days).round();

    Ok(FitnessData {
        source: DataSource::Csv,
        daily_average: DailyAverage {
            steps: avg_steps,
            calories_burned: avg_calories,
        },
        weekly_total: WeeklyTotal {
            workout_minutes: totals.workout_minutes,
        },
        activity_level: classify(avg_steps as f64, totals.workout_minutes),
    })
}
