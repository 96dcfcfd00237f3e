//! Domain types shared by the aggregator, the plan generator and the store.
//!
//! JSON field names follow the dashboard contract (camelCase, lowercase
//! enum tags), so every type here round-trips through `serde_json` unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::FitplanError;

/// Identifier of the user owning fitness data, preferences and plans.
pub type UserId = u64;

/// Where a [`FitnessData`] snapshot came from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Csv,
    Manual,
    #[serde(alias = "apple-health")]
    Api,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::Csv => "csv",
            DataSource::Manual => "manual",
            DataSource::Api => "api",
        }
    }
}

/// Five-tier activity label derived by [`crate::activity::classify`].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum ActivityLevel {
    Sedentary,
    #[serde(rename = "Lightly Active")]
    LightlyActive,
    #[serde(rename = "Moderately Active")]
    ModeratelyActive,
    #[serde(rename = "Very Active")]
    VeryActive,
    #[serde(rename = "Extremely Active")]
    ExtremelyActive,
}

impl ActivityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtremelyActive => "Extremely Active",
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyAverage {
    pub steps: u64,
    pub calories_burned: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTotal {
    pub workout_minutes: f64,
}

/// Normalized activity metrics for one user. Replaced wholesale on every import.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FitnessData {
    pub source: DataSource,
    pub daily_average: DailyAverage,
    pub weekly_total: WeeklyTotal,
    pub activity_level: ActivityLevel,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Endurance,
    GeneralFitness,
    StressReduction,
}

impl Goal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight-loss",
            Goal::MuscleGain => "muscle-gain",
            Goal::Endurance => "endurance",
            Goal::GeneralFitness => "general-fitness",
            Goal::StressReduction => "stress-reduction",
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Dietary {
    NoRestrictions,
    Vegetarian,
    Vegan,
    Keto,
    Paleo,
    LowCarb,
    GlutenFree,
}

impl Dietary {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dietary::NoRestrictions => "no-restrictions",
            Dietary::Vegetarian => "vegetarian",
            Dietary::Vegan => "vegan",
            Dietary::Keto => "keto",
            Dietary::Paleo => "paleo",
            Dietary::LowCarb => "low-carb",
            Dietary::GlutenFree => "gluten-free",
        }
    }
}

/// Daily time budget for exercise, in minutes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AvailableTime {
    #[serde(rename = "0-15")]
    UpTo15,
    #[serde(rename = "15-30")]
    From15To30,
    #[serde(rename = "30-60")]
    From30To60,
    #[serde(rename = "60+")]
    Over60,
}

impl AvailableTime {
    pub fn as_str(&self) -> &'static str {
        match self {
            AvailableTime::UpTo15 => "0-15",
            AvailableTime::From15To30 => "15-30",
            AvailableTime::From30To60 => "30-60",
            AvailableTime::Over60 => "60+",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub goal: Goal,
    pub dietary: Dietary,
    pub available_time: AvailableTime,
    pub fitness_level: u8,
}

impl UserPreferences {
    pub const MIN_FITNESS_LEVEL: u8 = 1;
    pub const MAX_FITNESS_LEVEL: u8 = 5;

    pub fn validate(&self) -> Result<(), FitplanError> {
        if !(Self::MIN_FITNESS_LEVEL..=Self::MAX_FITNESS_LEVEL).contains(&self.fitness_level) {
            return Err(FitplanError::Validation(format!(
                "fitness level must be between {} and {}, got {}",
                Self::MIN_FITNESS_LEVEL,
                Self::MAX_FITNESS_LEVEL,
                self.fitness_level
            )));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub name: String,
    pub description: String,
}

/// Daily macro targets in grams.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Macros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Nutrition {
    pub macros: Macros,
    pub meals: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DayPlan {
    pub workout: Vec<Exercise>,
    pub nutrition: Nutrition,
    pub tip: String,
}

/// The fixed keys of [`WeekPlan`], Monday first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

/// Seven day plans. Every weekday is a required field, so a value of this
/// type is always complete and renderable.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeekPlan {
    pub monday: DayPlan,
    pub tuesday: DayPlan,
    pub wednesday: DayPlan,
    pub thursday: DayPlan,
    pub friday: DayPlan,
    pub saturday: DayPlan,
    pub sunday: DayPlan,
}

impl WeekPlan {
    pub fn day(&self, day: Weekday) -> &DayPlan {
        match day {
            Weekday::Monday => &self.monday,
            Weekday::Tuesday => &self.tuesday,
            Weekday::Wednesday => &self.wednesday,
            Weekday::Thursday => &self.thursday,
            Weekday::Friday => &self.friday,
            Weekday::Saturday => &self.saturday,
            Weekday::Sunday => &self.sunday,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayPlan)> {
        Weekday::ALL.into_iter().map(move |d| (d, self.day(d)))
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FitnessPlan {
    pub id: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub days: WeekPlan,
}
