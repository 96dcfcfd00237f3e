//! Per-user operations behind the dashboard: imports, preferences and plans.
//!
//! Every call runs to completion on its own. Store writes happen only after
//! the operation has succeeded, so a failure leaves earlier data untouched.

use std::path::Path;
use std::sync::Arc;

use fitplan_core::apple_health::AppleHealthConnector;
use fitplan_core::csv_import::aggregate_csv_bytes;
use fitplan_core::dashboard::{self, DataSummary, ProgressSeries};
use fitplan_core::manual::ManualEntry;
use fitplan_core::observability;
use fitplan_core::plan::{PlanGenerator, starter_plan};
use fitplan_core::store::FitnessStore;
use fitplan_core::{
    DataSource, FitnessData, FitnessPlan, FitplanError, PlanCompletionProvider, UserId,
    UserPreferences,
};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

/// Upload ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Empty bodies pass; the aggregator reports them as holding no valid data.
pub fn check_upload_size(size: u64) -> AppResult<()> {
    if size > MAX_UPLOAD_BYTES {
        return Err(AppError::UploadTooLarge {
            size,
            limit: MAX_UPLOAD_BYTES,
        });
    }
    Ok(())
}

/// Read an upload from disk, refusing files over [`MAX_UPLOAD_BYTES`]
/// before loading them.
pub async fn read_upload(path: &Path) -> AppResult<Vec<u8>> {
    let meta = tokio::fs::metadata(path).await?;
    check_upload_size(meta.len())?;
    Ok(tokio::fs::read(path).await?)
}

#[derive(Clone)]
pub struct FitnessService {
    generator: PlanGenerator,
    store: Arc<dyn FitnessStore>,
    apple_health: AppleHealthConnector,
}

impl FitnessService {
    pub fn new(
        provider: Arc<dyn PlanCompletionProvider>,
        store: Arc<dyn FitnessStore>,
        apple_health: AppleHealthConnector,
    ) -> Self {
        Self {
            generator: PlanGenerator::new(provider),
            store,
            apple_health,
        }
    }

    async fn store_import(
        &self,
        user: UserId,
        source: DataSource,
        result: Result<FitnessData, FitplanError>,
    ) -> AppResult<FitnessData> {
        let data = match result {
            Ok(data) => data,
            Err(e) => {
                observability::record_import_failure(source);
                warn!(user, source = source.as_str(), error = %e, "fitness data import failed");
                return Err(e.into());
            }
        };
        self.store.save_fitness_data(user, data.clone()).await?;
        observability::record_import(source);
        info!(
            user,
            source = source.as_str(),
            steps = data.daily_average.steps,
            level = %data.activity_level,
            "stored fitness data"
        );
        Ok(data)
    }

    /// Aggregate an uploaded CSV and make it the user's fitness data.
    pub async fn upload_csv(&self, user: UserId, bytes: &[u8]) -> AppResult<FitnessData> {
        check_upload_size(bytes.len() as u64).inspect_err(|e| {
            warn!(user, error = %e, "rejected csv upload");
        })?;
        self.store_import(user, DataSource::Csv, aggregate_csv_bytes(bytes))
            .await
    }

    pub async fn save_manual_entry(
        &self,
        user: UserId,
        entry: ManualEntry,
    ) -> AppResult<FitnessData> {
        self.store_import(user, DataSource::Manual, entry.into_fitness_data())
            .await
    }

    pub async fn connect_apple_health(&self, user: UserId) -> AppResult<FitnessData> {
        let result = self.apple_health.fetch().await;
        self.store_import(user, DataSource::Api, result).await
    }

    pub async fn fitness_data(&self, user: UserId) -> AppResult<Option<FitnessData>> {
        Ok(self.store.fitness_data(user).await?)
    }

    /// Headline stats for the dashboard, `None` until data has been imported.
    pub async fn data_summary(&self, user: UserId) -> AppResult<Option<DataSummary>> {
        let data = self.store.fitness_data(user).await?;
        Ok(data.as_ref().map(dashboard::summarize))
    }

    /// Seven-day step series for the progress chart, `None` without data.
    pub async fn progress(&self, user: UserId) -> AppResult<Option<ProgressSeries>> {
        let data = self.store.fitness_data(user).await?;
        Ok(data.as_ref().map(dashboard::progress))
    }

    pub async fn save_preferences(
        &self,
        user: UserId,
        prefs: UserPreferences,
    ) -> AppResult<UserPreferences> {
        prefs.validate().inspect_err(|e| {
            warn!(user, error = %e, "rejected preferences");
        })?;
        self.store.save_preferences(user, prefs.clone()).await?;
        Ok(prefs)
    }

    pub async fn preferences(&self, user: UserId) -> AppResult<Option<UserPreferences>> {
        Ok(self.store.preferences(user).await?)
    }

    /// Generate and store a new plan from the user's stored data and preferences.
    pub async fn generate_plan(&self, user: UserId) -> AppResult<FitnessPlan> {
        let data = self.store.fitness_data(user).await?;
        let prefs = self.store.preferences(user).await?;
        let (Some(data), Some(prefs)) = (data, prefs) else {
            warn!(user, "plan requested before data and preferences were set");
            return Err(AppError::MissingPrerequisites);
        };

        let plan = match self.generator.generate(user, &data, &prefs).await {
            Ok(plan) => plan,
            Err(e) => {
                observability::record_plan_failure();
                warn!(user, error = %e, "plan generation failed");
                return Err(e.into());
            }
        };
        self.store.save_plan(user, plan.clone()).await?;
        observability::record_plan_generated();
        Ok(plan)
    }

    /// The newest plan, or a stored starter plan when the user has none yet.
    pub async fn current_plan(&self, user: UserId) -> AppResult<FitnessPlan> {
        if let Some(plan) = self.store.current_plan(user).await? {
            return Ok(plan);
        }
        let plan = starter_plan(user);
        self.store.save_plan(user, plan.clone()).await?;
        info!(user, plan_id = %plan.id, "issued starter plan");
        Ok(plan)
    }

    /// All plans for the user, newest first.
    pub async fn plan_history(&self, user: UserId) -> AppResult<Vec<FitnessPlan>> {
        Ok(self.store.plan_history(user).await?)
    }
}
