//! Fitness data aggregation and AI-backed weekly plan generation.
//!
//! Raw activity exports become normalized [`model::FitnessData`]; together
//! with [`model::UserPreferences`] they are turned into a seven-day
//! [`model::FitnessPlan`] by a [`PlanCompletionProvider`].

use async_trait::async_trait;
use thiserror::Error;

pub mod activity;
pub mod apple_health;
pub mod config;
pub mod csv_import;
pub mod dashboard;
pub mod http_client;
pub mod manual;
pub mod model;
pub mod observability;
pub mod plan;
pub mod store;

pub use model::{
    ActivityLevel, DataSource, FitnessData, FitnessPlan, UserId, UserPreferences, WeekPlan,
    Weekday,
};

#[derive(Debug, Error)]
pub enum FitplanError {
    /// The input held no row with a usable step count.
    #[error("no valid data: {0}")]
    NoValidData(String),
    /// The CSV could not be read as a table.
    #[error("malformed input: {0}")]
    MalformedInput(String),
    /// The completion service failed or returned an unusable plan.
    #[error("plan generation failed: {0}")]
    PlanGeneration(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("configuration error: {0}")]
    Config(String),
}

/// Capability that turns a prompt pair into raw JSON text.
///
/// Output is non-deterministic; callers parse and validate it themselves.
#[async_trait]
pub trait PlanCompletionProvider: Send + Sync + 'static {
    async fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, FitplanError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_failure() {
        let e = FitplanError::NoValidData("empty".into());
        assert_eq!(e.to_string(), "no valid data: empty");
        let e = FitplanError::PlanGeneration("HTTP 500".into());
        assert!(e.to_string().starts_with("plan generation failed"));
    }
}
