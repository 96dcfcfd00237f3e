//! Weekly plan generation.
//!
//! The prompt template and the expected response shape live here; the
//! language model itself sits behind [`PlanCompletionProvider`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, info};

use crate::model::{
    DayPlan, Exercise, FitnessData, FitnessPlan, Macros, Nutrition, UserId, UserPreferences,
    WeekPlan, Weekday,
};
use crate::{FitplanError, PlanCompletionProvider};

pub const SYSTEM_PROMPT: &str = "You are a professional fitness trainer and nutritionist, specialized in creating personalized fitness and meal plans based on user data and goals.";

const RESPONSE_SHAPE: &str = r#"{
  "days": {
    "monday": {
      "workout": [
        { "name": "Exercise Name", "description": "Exercise description with sets/reps" }
      ],
      "nutrition": {
        "macros": { "protein": 0, "carbs": 0, "fat": 0 },
        "meals": ["Meal 1 description", "Meal 2 description", "etc."]
      },
      "tip": "Motivational tip for the day"
    },
    "tuesday": { ... },
    // etc. for all days of the week
  }
}"#;

/// Render the user prompt for one plan request.
pub fn build_prompt(data: &FitnessData, prefs: &UserPreferences) -> String {
    format!(
        "Based on the following user fitness data and preferences, create a personalized 7-day fitness and nutrition plan:

## User Fitness Data
- Daily Average Steps: {steps}
- Daily Average Calories Burned: {calories}
- Weekly Workout Minutes: {minutes}
- Activity Level: {level}

## User Preferences
- Primary Goal: {goal}
- Dietary Preferences: {dietary}
- Available Time for Exercise: {time} minutes per day
- Fitness Level (1-5): {fitness}

Create a detailed plan with:
1. Specific workouts for each day (with exercise names, sets, reps or duration)
2. Nutrition recommendations (macros targets and meal ideas)
3. A daily motivational tip

Format the response as JSON following this structure exactly:
{shape}
",
        steps = data.daily_average.steps,
        calories = data.daily_average.calories_burned,
        minutes = data.weekly_total.workout_minutes,
        level = data.activity_level,
        goal = prefs.goal.as_str(),
        dietary = prefs.dietary.as_str(),
        time = prefs.available_time.as_str(),
        fitness = prefs.fitness_level,
        shape = RESPONSE_SHAPE,
    )
}

#[derive(Debug, Deserialize)]
struct PlanResponse {
    days: WeekPlan,
}

/// Parse raw model output. Anything short of a complete week is rejected.
pub fn parse_plan_response(raw: &str) -> Result<WeekPlan, FitplanError> {
    serde_json::from_str::<PlanResponse>(raw)
        .map(|r| r.days)
        .map_err(|e| FitplanError::PlanGeneration(format!("invalid plan JSON: {e}")))
}

/// `plan_<unix millis>_<9 random characters>`. Unique in practice, not
/// cryptographically.
pub fn new_plan_id(now: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("plan_{}_{}", now.timestamp_millis(), &suffix[..9])
}

#[derive(Clone)]
pub struct PlanGenerator {
    provider: Arc<dyn PlanCompletionProvider>,
}

impl PlanGenerator {
    pub fn new(provider: Arc<dyn PlanCompletionProvider>) -> Self {
        Self { provider }
    }

    /// One completion call per invocation; the result is never partial.
    pub async fn generate(
        &self,
        user_id: UserId,
        data: &FitnessData,
        prefs: &UserPreferences,
    ) -> Result<FitnessPlan, FitplanError> {
        prefs.validate()?;
        let prompt = build_prompt(data, prefs);
        debug!(user_id, prompt_len = prompt.len(), "generating plan");

        let raw = self.provider.complete_json(SYSTEM_PROMPT, &prompt).await?;
        let days = parse_plan_response(&raw)?;

        let now = Utc::now();
        let plan = FitnessPlan {
            id: new_plan_id(now),
            user_id,
            created_at: now,
            days,
        };
        info!(user_id, plan_id = %plan.id, "generated fitness plan");
        Ok(plan)
    }
}

fn starter_workout(day: Weekday) -> Vec<Exercise> {
    let pairs: &[(&str, &str)] = match day {
        Weekday::Monday => &[
            ("Push-ups", "3 sets of 10 reps"),
            ("Squats", "3 sets of 15 reps"),
        ],
        Weekday::Tuesday => &[
            ("Walking", "30 minutes at moderate pace"),
            ("Stretching", "15 minutes full body stretch"),
        ],
        Weekday::Wednesday => &[
            ("Plank", "3 sets of 30 seconds"),
            ("Lunges", "3 sets of 10 reps each leg"),
        ],
        Weekday::Thursday => &[("Rest Day", "Active recovery or light walking")],
        Weekday::Friday => &[
            ("Jumping Jacks", "3 sets of 30 seconds"),
            ("Bicep Curls", "3 sets of 12 reps with light weights"),
        ],
        Weekday::Saturday => &[
            ("Jogging", "20 minutes at comfortable pace"),
            ("Crunches", "3 sets of 15 reps"),
        ],
        Weekday::Sunday => &[("Rest Day", "Light stretching and walking")],
    };
    pairs
        .iter()
        .map(|(name, description)| Exercise {
            name: (*name).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

fn starter_day(day: Weekday) -> DayPlan {
    let key = day.as_str();
    let mut title = key.to_string();
    title[..1].make_ascii_uppercase();
    let focus = match day {
        Weekday::Thursday | Weekday::Sunday => "recover",
        _ => "build strength",
    };
    DayPlan {
        workout: starter_workout(day),
        nutrition: Nutrition {
            macros: Macros {
                protein: 120.0,
                carbs: 200.0,
                fat: 65.0,
            },
            meals: vec![
                "Breakfast: Greek yogurt with berries and granola".into(),
                "Lunch: Grilled chicken salad with olive oil dressing".into(),
                "Dinner: Baked salmon with roasted vegetables".into(),
                "Snack: Apple with almond butter".into(),
            ],
        },
        tip: format!(
            "Focus on staying hydrated today and getting enough rest. {title} is a good day to {focus}."
        ),
    }
}

/// Default week handed out before the user has generated a plan.
pub fn starter_plan(user_id: UserId) -> FitnessPlan {
    let now = Utc::now();
    FitnessPlan {
        id: format!("starter_plan_{}", now.timestamp_millis()),
        user_id,
        created_at: now,
        days: WeekPlan {
            monday: starter_day(Weekday::Monday),
            tuesday: starter_day(Weekday::Tuesday),
            wednesday: starter_day(Weekday::Wednesday),
            thursday: starter_day(Weekday::Thursday),
            friday: starter_day(Weekday::Friday),
            saturday: starter_day(Weekday::Saturday),
            sunday: starter_day(Weekday::Sunday),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ActivityLevel, AvailableTime, DailyAverage, DataSource, Dietary, Goal, WeeklyTotal,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CannedProvider {
        reply: Result<String, String>,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl CannedProvider {
        fn ok(body: &str) -> Self {
            Self {
                reply: Ok(body.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PlanCompletionProvider for CannedProvider {
        async fn complete_json(&self, system: &str, user: &str) -> Result<String, FitplanError> {
            self.prompts
                .lock()
                .unwrap()
                .push((system.to_string(), user.to_string()));
            self.reply.clone().map_err(FitplanError::PlanGeneration)
        }
    }

    fn data() -> FitnessData {
        FitnessData {
            source: DataSource::Csv,
            daily_average: DailyAverage {
                steps: 7500,
                calories_burned: 410.0,
            },
            weekly_total: WeeklyTotal {
                workout_minutes: 95.0,
            },
            activity_level: ActivityLevel::VeryActive,
        }
    }

    fn prefs() -> UserPreferences {
        UserPreferences {
            goal: Goal::MuscleGain,
            dietary: Dietary::Vegetarian,
            available_time: AvailableTime::From30To60,
            fitness_level: 4,
        }
    }

    fn full_week_json() -> String {
        let week = starter_plan(1).days;
        serde_json::json!({ "days": week }).to_string()
    }

    #[test]
    fn prompt_embeds_metrics_and_preferences() {
        let prompt = build_prompt(&data(), &prefs());
        assert!(prompt.contains("Daily Average Steps: 7500"));
        assert!(prompt.contains("Daily Average Calories Burned: 410"));
        assert!(prompt.contains("Weekly Workout Minutes: 95"));
        assert!(prompt.contains("Activity Level: Very Active"));
        assert!(prompt.contains("Primary Goal: muscle-gain"));
        assert!(prompt.contains("Dietary Preferences: vegetarian"));
        assert!(prompt.contains("Available Time for Exercise: 30-60 minutes per day"));
        assert!(prompt.contains("Fitness Level (1-5): 4"));
        assert!(prompt.contains("\"monday\""));
    }

    #[tokio::test]
    async fn generate_wraps_days_with_id_and_timestamp() {
        let provider = Arc::new(CannedProvider::ok(&full_week_json()));
        let generator = PlanGenerator::new(provider.clone());
        let before = Utc::now();
        let plan = generator
            .generate(42, &data(), &prefs())
            .await
            .expect("plan");
        assert_eq!(plan.user_id, 42);
        assert!(plan.id.starts_with("plan_"));
        assert!(plan.created_at >= before);
        assert_eq!(plan.days.monday.workout[0].name, "Push-ups");

        let prompts = provider.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].0, SYSTEM_PROMPT);
    }

    #[tokio::test]
    async fn invalid_json_is_a_generation_error() {
        let generator = PlanGenerator::new(Arc::new(CannedProvider::ok("{\"days\": {\"monday\"")));
        let res = generator.generate(1, &data(), &prefs()).await;
        assert!(matches!(res, Err(FitplanError::PlanGeneration(_))));
    }

    #[tokio::test]
    async fn missing_weekday_is_a_generation_error() {
        let mut v: serde_json::Value = serde_json::from_str(&full_week_json()).unwrap();
        v["days"].as_object_mut().unwrap().remove("friday");
        let generator = PlanGenerator::new(Arc::new(CannedProvider::ok(&v.to_string())));
        let res = generator.generate(1, &data(), &prefs()).await;
        assert!(matches!(res, Err(FitplanError::PlanGeneration(_))));
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let provider = CannedProvider {
            reply: Err("upstream down".into()),
            prompts: Mutex::new(Vec::new()),
        };
        let generator = PlanGenerator::new(Arc::new(provider));
        let err = generator
            .generate(1, &data(), &prefs())
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("upstream down"));
    }

    #[tokio::test]
    async fn invalid_preferences_skip_the_provider() {
        let provider = Arc::new(CannedProvider::ok(&full_week_json()));
        let generator = PlanGenerator::new(provider.clone());
        let mut p = prefs();
        p.fitness_level = 9;
        let res = generator.generate(1, &data(), &p).await;
        assert!(matches!(res, Err(FitplanError::Validation(_))));
        assert!(provider.prompts.lock().unwrap().is_empty());
    }

    #[test]
    fn plan_ids_have_expected_shape_and_differ() {
        let now = Utc::now();
        let a = new_plan_id(now);
        let b = new_plan_id(now);
        assert_ne!(a, b);
        let parts: Vec<&str> = a.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn starter_plan_covers_the_week() {
        let plan = starter_plan(3);
        assert!(plan.id.starts_with("starter_plan_"));
        assert_eq!(plan.days.thursday.workout[0].name, "Rest Day");
        assert!(plan.days.sunday.tip.ends_with("Sunday is a good day to recover."));
        assert!(
            plan.days
                .monday
                .tip
                .ends_with("Monday is a good day to build strength.")
        );
        for (_, day) in plan.days.iter() {
            assert_eq!(day.nutrition.meals.len(), 4);
            assert_eq!(day.nutrition.macros.protein, 120.0);
        }
    }
}
