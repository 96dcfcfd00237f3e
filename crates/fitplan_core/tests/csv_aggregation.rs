use fitplan_core::csv_import::{aggregate_csv, aggregate_csv_bytes};
use fitplan_core::{ActivityLevel, DataSource, FitplanError};

const FITBIT_STYLE: &str = "\
Date,Steps,Calories,ActivityMinutes
2025-03-01,10234,2310,45
2025-03-02,8450,2150,30
2025-03-03,12011,2480,60
2025-03-04,6032,1980,0
2025-03-05,9400,2200,25
2025-03-06,11120,2390,50
2025-03-07,7600,2050,20
";

const APP_EXPORT: &str = "\
day,step_count,calorie_burn,workout_minutes,notes
mon,5000,300,30,easy
tue,,,15,rest day
wed,7000,n/a,45,intervals
";

#[test]
fn fitbit_style_export() {
    let data = aggregate_csv(FITBIT_STYLE).expect("aggregate");
    let steps = [10234u64, 8450, 12011, 6032, 9400, 11120, 7600];
    let expected = (steps.iter().sum::<u64>() as f64 / steps.len() as f64).round() as u64;
    assert_eq!(data.daily_average.steps, expected);
    assert_eq!(data.weekly_total.workout_minutes, 230.0);
    assert_eq!(data.source, DataSource::Csv);
    // 9264/10000 + 230/150 = 2.46
    assert_eq!(data.activity_level, ActivityLevel::ExtremelyActive);
}

#[test]
fn sparse_app_export_only_counts_step_rows_as_days() {
    let data = aggregate_csv(APP_EXPORT).expect("aggregate");
    assert_eq!(data.daily_average.steps, 6000);
    // 300 calories over 2 step days
    assert_eq!(data.daily_average.calories_burned, 150.0);
    assert_eq!(data.weekly_total.workout_minutes, 90.0);
}

#[test]
fn bytes_entry_point_matches_text() {
    let from_bytes = aggregate_csv_bytes(FITBIT_STYLE.as_bytes()).expect("bytes");
    let from_text = aggregate_csv(FITBIT_STYLE).expect("text");
    assert_eq!(from_bytes, from_text);
}

#[test]
fn no_step_column_anywhere_fails() {
    let res = aggregate_csv("date,weight\n2025-01-01,80\n");
    assert!(matches!(res, Err(FitplanError::NoValidData(_))));
}

#[test]
fn output_serializes_to_dashboard_shape() {
    let data = aggregate_csv("steps,calories,workout_minutes\n3000,200,15\n").expect("aggregate");
    let v = serde_json::to_value(&data).expect("json");
    assert_eq!(
        v,
        serde_json::json!({
            "source": "csv",
            "dailyAverage": { "steps": 3000, "caloriesBurned": 200.0 },
            "weeklyTotal": { "workoutMinutes": 15.0 },
            "activityLevel": "Sedentary"
        })
    );
}
