//! Metric names and recording helpers. Without an installed recorder the
//! `metrics` macros are no-ops.

use crate::model::DataSource;

pub const IMPORTS_TOTAL: &str = "fitplan_imports_total";
pub const IMPORT_FAILURES_TOTAL: &str = "fitplan_import_failures_total";
pub const PLANS_GENERATED_TOTAL: &str = "fitplan_plans_generated_total";
pub const PLAN_FAILURES_TOTAL: &str = "fitplan_plan_failures_total";

pub fn record_import(source: DataSource) {
    metrics::counter!(IMPORTS_TOTAL, "source" => source.as_str()).increment(1);
}

pub fn record_import_failure(source: DataSource) {
    metrics::counter!(IMPORT_FAILURES_TOTAL, "source" => source.as_str()).increment(1);
}

pub fn record_plan_generated() {
    metrics::counter!(PLANS_GENERATED_TOTAL).increment(1);
}

pub fn record_plan_failure() {
    metrics::counter!(PLAN_FAILURES_TOTAL).increment(1);
}
