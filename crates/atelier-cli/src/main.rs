//! Atelier Analytics - Command Line Entry Point
//!
//! Loads a workspace snapshot, runs one report through the engine, and
//! prints the composed result as JSON on stdout. Diagnostics go to stderr
//! so the report stream stays clean for piping.

mod snapshot;

use anyhow::Result;
use atelier_common::logging::{init_logging, LoggingConfig};
use atelier_common::utils::{now, parse_date, today};
use atelier_common::Timestamp;
use atelier_config::SettingsLoader;
use atelier_reports::{
    DateRange, InMemorySource, ReportEngine, ReportKind, ReportRequest, ReportResult,
};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the JSON workspace snapshot
    #[arg(short, long)]
    data: PathBuf,

    /// Report to generate (for example revenue_analysis or budget_variance)
    #[arg(short, long)]
    report: String,

    /// Range start as YYYY-MM-DD; requires --to
    #[arg(long, requires = "to")]
    from: Option<String>,

    /// Range end as YYYY-MM-DD; requires --from
    #[arg(long, requires = "from")]
    to: Option<String>,

    /// Named relative range (last_7_days, last_30_days, last_90_days,
    /// last_6_months, last_year)
    #[arg(short, long, conflicts_with_all = ["from", "to"])]
    preset: Option<String>,

    /// Time series granularity (day, week, month, quarter, year)
    #[arg(short, long, default_value = "day")]
    granularity: String,

    /// Settings file path
    #[arg(short, long)]
    config: Option<String>,

    /// Log level, overriding the settings file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Restrict monetary records to a category label; repeatable
    #[arg(long)]
    category: Vec<String>,
}

/// Composed report plus the generation timestamp the engine itself never
/// attaches.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportEnvelope {
    generated_at: Timestamp,
    #[serde(flatten)]
    result: ReportResult,
}

fn build_request(args: &Args) -> Result<ReportRequest> {
    let kind: ReportKind = args.report.parse()?;
    let mut request = ReportRequest::new(kind);
    request.granularity = args.granularity.parse()?;

    if let (Some(from), Some(to)) = (&args.from, &args.to) {
        request.range = Some(DateRange::new(parse_date(from)?, parse_date(to)?)?);
    }
    if let Some(preset) = &args.preset {
        request.preset = Some(preset.parse()?);
    }
    if !args.category.is_empty() {
        request.filters.categories = Some(args.category.clone());
    }

    Ok(request)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => SettingsLoader::load_from_file(path)?,
        None => SettingsLoader::load()?,
    };

    let level = args
        .log_level
        .clone()
        .unwrap_or_else(|| settings.logging.level.clone());
    init_logging(LoggingConfig {
        level,
        json_format: settings.logging.json,
        ..LoggingConfig::default()
    })
    .map_err(|e| anyhow::anyhow!(e))?;

    info!("Starting Atelier analytics");
    info!("Configuration loaded successfully");

    let request = build_request(&args)?;
    let records = snapshot::load_snapshot(&args.data)?;
    let source = InMemorySource::new(records);
    let engine = ReportEngine::new(settings.report);

    let result = engine.generate(&source, &request, today()).await?;
    info!("Report composed: {}", request.kind);

    let envelope = ReportEnvelope {
        generated_at: now(),
        result,
    };
    println!("{}", serde_json::to_string_pretty(&envelope)?);

    Ok(())
}
