use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use fitplan_app::{AppError, AppResult, FitnessService, LOCAL_USER, read_upload};
use fitplan_core::UserPreferences;
use fitplan_core::apple_health::AppleHealthConnector;
use fitplan_core::config::Config;
use fitplan_core::csv_import::aggregate_csv_bytes;
use fitplan_core::dashboard;
use fitplan_core::http_client::OpenAiCompletionClient;
use fitplan_core::manual::ManualEntry;
use fitplan_core::model::{AvailableTime, Dietary, Goal};
use fitplan_core::plan::starter_plan;
use fitplan_core::store::InMemoryStore;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Parser)]
#[command(name = "fitplan", version, about = "Aggregate fitness exports and generate weekly plans")]
struct Cli {
    /// Print a Prometheus snapshot of the run's counters to stderr on exit.
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate a CSV export and print the normalized fitness data.
    Analyze { csv: PathBuf },
    /// Print the dashboard summary and seven-day progress series for a CSV export.
    Summary { csv: PathBuf },
    /// Import data, apply preferences and generate a 7-day plan.
    Plan(PlanArgs),
    /// Print the default starter plan.
    Starter,
}

#[derive(Debug, Args)]
struct PlanArgs {
    #[arg(long, conflicts_with_all = ["apple_health", "manual_steps"])]
    csv: Option<PathBuf>,

    /// Use the simulated Apple Health connector.
    #[arg(long, conflicts_with = "manual_steps")]
    apple_health: bool,

    #[arg(long, requires_all = ["manual_calories", "manual_minutes"])]
    manual_steps: Option<f64>,
    #[arg(long, requires = "manual_steps")]
    manual_calories: Option<f64>,
    #[arg(long, requires = "manual_steps")]
    manual_minutes: Option<f64>,

    #[arg(long, value_parser = parse_choice::<Goal>)]
    goal: Goal,
    #[arg(long, value_parser = parse_choice::<Dietary>, default_value = "no-restrictions")]
    dietary: Dietary,
    #[arg(long, value_parser = parse_choice::<AvailableTime>, default_value = "30-60")]
    available_time: AvailableTime,
    #[arg(long, default_value_t = 3)]
    fitness_level: u8,
}

/// Parse a CLI value using the same kebab-case tags as the JSON contract.
fn parse_choice<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(raw.to_string()))
        .map_err(|_| format!("unsupported value '{raw}'"))
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::InvalidInput(format!("could not render output: {e}")))?;
    println!("{text}");
    Ok(())
}

async fn run_plan(args: PlanArgs) -> AppResult<()> {
    let config = Config::from_env()?;
    let provider = OpenAiCompletionClient::from_config(&config);
    tracing::info!(model = provider.model(), "fitplan: using completion model");
    let service = FitnessService::new(
        Arc::new(provider),
        Arc::new(InMemoryStore::new()),
        AppleHealthConnector::new(config.apple_health_latency),
    );

    if let Some(path) = &args.csv {
        let bytes = read_upload(path).await?;
        service.upload_csv(LOCAL_USER, &bytes).await?;
    } else if args.apple_health {
        service.connect_apple_health(LOCAL_USER).await?;
    } else if let (Some(steps), Some(calories), Some(minutes)) =
        (args.manual_steps, args.manual_calories, args.manual_minutes)
    {
        let entry = ManualEntry {
            avg_steps: steps,
            avg_calories_burned: calories,
            weekly_workout_minutes: minutes,
        };
        service.save_manual_entry(LOCAL_USER, entry).await?;
    } else {
        return Err(AppError::InvalidInput(
            "choose a data source: --csv <file>, --apple-health, or --manual-steps/--manual-calories/--manual-minutes".into(),
        ));
    }

    service
        .save_preferences(
            LOCAL_USER,
            UserPreferences {
                goal: args.goal,
                dietary: args.dietary,
                available_time: args.available_time,
                fitness_level: args.fitness_level,
            },
        )
        .await?;

    let plan = service.generate_plan(LOCAL_USER).await?;
    print_json(&plan)
}

async fn run(command: Command) -> AppResult<()> {
    match command {
        Command::Analyze { csv } => {
            let bytes = read_upload(&csv).await?;
            let data = aggregate_csv_bytes(&bytes)?;
            print_json(&data)
        }
        Command::Summary { csv } => {
            let bytes = read_upload(&csv).await?;
            let data = aggregate_csv_bytes(&bytes)?;
            print_json(&serde_json::json!({
                "summary": dashboard::summarize(&data),
                "progress": dashboard::progress(&data),
            }))
        }
        Command::Plan(args) => run_plan(args).await,
        Command::Starter => print_json(&starter_plan(LOCAL_USER)),
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    let log_env = fitplan_app::log_filter_from(|k| std::env::var(k).ok());
    // stdout carries JSON output only
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(fitplan_app::env_filter(&log_env))
        .init();
    tracing::info!(%log_env, "fitplan: log filter");

    let metrics: Option<PrometheusHandle> = if cli.print_metrics {
        Some(PrometheusBuilder::new().install_recorder()?)
    } else {
        None
    };

    let result = run(cli.command).await;

    if let Some(handle) = metrics {
        eprintln!("{}", handle.render());
    }

    if let Err(e) = result {
        tracing::error!(error = %e, "fitplan: command failed");
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_choice_uses_json_tags() {
        assert_eq!(parse_choice::<Goal>("weight-loss"), Ok(Goal::WeightLoss));
        assert_eq!(parse_choice::<AvailableTime>("60+"), Ok(AvailableTime::Over60));
        assert!(parse_choice::<Dietary>("carnivore").is_err());
    }

    #[test]
    fn plan_with_manual_source_parses() {
        let cli = Cli::try_parse_from([
            "fitplan",
            "plan",
            "--manual-steps",
            "8000",
            "--manual-calories",
            "350",
            "--manual-minutes",
            "120",
            "--goal",
            "endurance",
            "--fitness-level",
            "4",
        ])
        .expect("parse");
        match cli.command {
            Command::Plan(args) => {
                assert_eq!(args.manual_steps, Some(8000.0));
                assert_eq!(args.goal, Goal::Endurance);
                assert_eq!(args.dietary, Dietary::NoRestrictions);
                assert_eq!(args.available_time, AvailableTime::From30To60);
                assert_eq!(args.fitness_level, 4);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn summary_takes_a_csv_path() {
        let cli = Cli::try_parse_from(["fitplan", "summary", "week.csv"]).expect("parse");
        match cli.command {
            Command::Summary { csv } => assert_eq!(csv, PathBuf::from("week.csv")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn csv_and_apple_health_conflict() {
        let res = Cli::try_parse_from([
            "fitplan",
            "plan",
            "--csv",
            "a.csv",
            "--apple-health",
            "--goal",
            "endurance",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn manual_steps_require_the_other_manual_fields() {
        let res = Cli::try_parse_from([
            "fitplan",
            "plan",
            "--manual-steps",
            "8000",
            "--goal",
            "endurance",
        ]);
        assert!(res.is_err());
    }
}
