//! vitals - health risk scoring from the command line.
//!
//! `vitals score` runs one assessment over measurements passed as flags and
//! prints the report as text or JSON. `vitals profiles` lists the built-in
//! scoring profiles. Advice is requested only with `--advice` and degrades
//! to a placeholder when the chat service is unreachable or unconfigured.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use vitals_core::advice::{
    AdviceOutcome, advice_unavailable, build_advice_prompt, generate_with_fallback,
};
use vitals_core::measurement::{Measurement, MeasurementRecord};
use vitals_core::report::{AssessmentReport, build_report, render_text};
use vitals_core::scoring::{
    BUILTIN_PROFILE_NAMES, RiskAssessment, ScoreProfile, ScorerMetrics, assess,
};
use vitals_infra::config::load_profile_file;
use vitals_infra::openai::ChatAdviceClient;

#[derive(Parser)]
#[command(name = "vitals")]
#[command(about = "Health risk assessment from routine measurements")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one set of measurements against a risk profile
    Score(ScoreArgs),

    /// List the built-in risk profiles
    Profiles,
}

#[derive(clap::Args)]
struct ScoreArgs {
    /// Age in years
    #[arg(long)]
    age: Option<f64>,

    /// Glucose level in mg/dL
    #[arg(long)]
    glucose: Option<f64>,

    /// Body mass index
    #[arg(long)]
    bmi: Option<f64>,

    /// Systolic blood pressure in mm Hg
    #[arg(long)]
    systolic: Option<f64>,

    /// Diastolic blood pressure in mm Hg
    #[arg(long)]
    diastolic: Option<f64>,

    /// Fasting insulin in uIU/mL
    #[arg(long)]
    insulin: Option<f64>,

    /// Total cholesterol in mg/dL
    #[arg(long)]
    cholesterol: Option<f64>,

    /// Triglycerides in mg/dL
    #[arg(long)]
    triglycerides: Option<f64>,

    /// Built-in profile to score against
    #[arg(short, long, default_value = "standard")]
    profile: String,

    /// Load the profile from a JSON file instead of the built-ins
    #[arg(long)]
    profile_file: Option<PathBuf>,

    /// Request tailored recommendations from the advice service
    #[arg(long)]
    advice: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score(args) => run_score(args),
        Commands::Profiles => {
            run_profiles();
            Ok(())
        }
    }
}

fn run_score(args: ScoreArgs) -> anyhow::Result<()> {
    let record = build_record(&args);
    let profile = select_profile(&args)?;

    let mut metrics = ScorerMetrics::new();
    let assessment = assess(&profile, &record, &mut metrics)?;

    let advice = if args.advice {
        Some(request_advice(&profile, &record, &assessment))
    } else {
        None
    };

    let report = build_report(&record, assessment, advice);
    match args.format {
        OutputFormat::Text => print!("{}", render_text(&report)),
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report_json(&report))?)
        }
    }
    Ok(())
}

fn run_profiles() {
    println!("Built-in profiles:");
    for &name in BUILTIN_PROFILE_NAMES {
        if let Some(profile) = ScoreProfile::builtin(name) {
            let factors: Vec<&str> = profile.factors.iter().map(|f| f.name()).collect();
            println!(
                "  {:<10} {:<12} cutoffs {:.2}/{:.2}  factors: {}",
                profile.name,
                profile.algorithm.kind(),
                profile.thresholds.medium_at,
                profile.thresholds.high_at,
                factors.join(", ")
            );
        }
    }
}

/// Collect the measurement flags that were actually given. Validation of
/// what the profile needs happens inside the assessment, not here.
fn build_record(args: &ScoreArgs) -> MeasurementRecord {
    let entries = [
        (Measurement::Age, args.age),
        (Measurement::Glucose, args.glucose),
        (Measurement::Bmi, args.bmi),
        (Measurement::SystolicBp, args.systolic),
        (Measurement::DiastolicBp, args.diastolic),
        (Measurement::Insulin, args.insulin),
        (Measurement::Cholesterol, args.cholesterol),
        (Measurement::Triglycerides, args.triglycerides),
    ];
    let mut record = MeasurementRecord::new();
    for (measurement, value) in entries {
        if let Some(value) = value {
            record.set(measurement, value);
        }
    }
    record
}

fn select_profile(args: &ScoreArgs) -> anyhow::Result<ScoreProfile> {
    if let Some(path) = &args.profile_file {
        return Ok(load_profile_file(path)?);
    }
    ScoreProfile::builtin(&args.profile).ok_or_else(|| {
        anyhow::anyhow!(
            "unknown profile '{}'; run `vitals profiles` to list the built-ins",
            args.profile
        )
    })
}

fn request_advice(
    profile: &ScoreProfile,
    record: &MeasurementRecord,
    assessment: &RiskAssessment,
) -> AdviceOutcome {
    let prompt = build_advice_prompt(profile, record, assessment);
    match ChatAdviceClient::from_env() {
        Ok(client) => {
            info!("AdviceRequested model={}", client.model());
            generate_with_fallback(&client, &prompt)
        }
        Err(err) => {
            warn!("AdviceClientUnavailable error={err}");
            advice_unavailable(format!("advice client unavailable: {err}"))
        }
    }
}

#[derive(Serialize)]
struct ReportJson<'a> {
    fingerprint: &'a str,
    profile: &'a str,
    score: f64,
    category: CategoryJson,
    components: Vec<ComponentJson>,
    risk_pct: f64,
    normal_pct: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    advice: Option<AdviceJson<'a>>,
}

#[derive(Serialize)]
struct CategoryJson {
    name: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct ComponentJson {
    factor: &'static str,
    risk: f64,
}

#[derive(Serialize)]
struct AdviceJson<'a> {
    generated: bool,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

fn report_json(report: &AssessmentReport) -> ReportJson<'_> {
    let components = report
        .assessment
        .components
        .iter()
        .map(|(&factor, &risk)| ComponentJson {
            factor: factor.name(),
            risk,
        })
        .collect();
    let advice = report.advice.as_ref().map(|outcome| match outcome {
        AdviceOutcome::Generated { text } => AdviceJson {
            generated: true,
            text,
            reason: None,
        },
        AdviceOutcome::Unavailable { placeholder, reason } => AdviceJson {
            generated: false,
            text: placeholder,
            reason: Some(reason),
        },
    });
    ReportJson {
        fingerprint: &report.fingerprint,
        profile: &report.assessment.profile,
        score: report.assessment.score,
        category: CategoryJson {
            name: report.assessment.category.name(),
            label: report.assessment.category.label(),
        },
        components,
        risk_pct: report.risk_pct,
        normal_pct: report.normal_pct,
        advice,
    }
}
