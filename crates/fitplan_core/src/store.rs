//! Per-user storage of fitness data, preferences and plan history.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::FitplanError;
use crate::model::{FitnessData, FitnessPlan, UserId, UserPreferences};

#[async_trait]
pub trait FitnessStore: Send + Sync + 'static {
    /// Replace the user's fitness data.
    async fn save_fitness_data(&self, user: UserId, data: FitnessData)
    -> Result<(), FitplanError>;
    async fn fitness_data(&self, user: UserId) -> Result<Option<FitnessData>, FitplanError>;

    /// Replace the user's preferences.
    async fn save_preferences(
        &self,
        user: UserId,
        prefs: UserPreferences,
    ) -> Result<(), FitplanError>;
    async fn preferences(&self, user: UserId) -> Result<Option<UserPreferences>, FitplanError>;

    /// Append a plan; it becomes the current plan.
    async fn save_plan(&self, user: UserId, plan: FitnessPlan) -> Result<(), FitplanError>;
    async fn current_plan(&self, user: UserId) -> Result<Option<FitnessPlan>, FitplanError>;
    /// All plans, newest first.
    async fn plan_history(&self, user: UserId) -> Result<Vec<FitnessPlan>, FitplanError>;
}

/// Non-durable store backed by hash maps.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    fitness_data: RwLock<HashMap<UserId, FitnessData>>,
    preferences: RwLock<HashMap<UserId, UserPreferences>>,
    // oldest first; readers reverse
    plans: RwLock<HashMap<UserId, Vec<FitnessPlan>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FitnessStore for InMemoryStore {
    async fn save_fitness_data(
        &self,
        user: UserId,
        data: FitnessData,
    ) -> Result<(), FitplanError> {
        self.fitness_data.write().await.insert(user, data);
        Ok(())
    }

    async fn fitness_data(&self, user: UserId) -> Result<Option<FitnessData>, FitplanError> {
        Ok(self.fitness_data.read().await.get(&user).cloned())
    }

    async fn save_preferences(
        &self,
        user: UserId,
        prefs: UserPreferences,
    ) -> Result<(), FitplanError> {
        self.preferences.write().await.insert(user, prefs);
        Ok(())
    }

    async fn preferences(&self, user: UserId) -> Result<Option<UserPreferences>, FitplanError> {
        Ok(self.preferences.read().await.get(&user).cloned())
    }

    async fn save_plan(&self, user: UserId, plan: FitnessPlan) -> Result<(), FitplanError> {
        self.plans.write().await.entry(user).or_default().push(plan);
        Ok(())
    }

    async fn current_plan(&self, user: UserId) -> Result<Option<FitnessPlan>, FitplanError> {
        Ok(self
            .plans
            .read()
            .await
            .get(&user)
            .and_then(|plans| plans.last())
            .cloned())
    }

    async fn plan_history(&self, user: UserId) -> Result<Vec<FitnessPlan>, FitplanError> {
        Ok(self
            .plans
            .read()
            .await
            .get(&user)
            .map(|plans| plans.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}
