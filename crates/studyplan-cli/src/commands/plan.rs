use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Args;
use studyplan_core::{
    default_start_date, format_duration, run_plan, Config, CsvSink, PlanInputs, PlanRequest,
    RunSummary, ScheduledEntry, StorageMode,
};

#[derive(Args)]
pub struct PlanArgs {
    /// First date to schedule (YYYY-MM-DD); defaults to today plus planner.start_offset_days
    pub start_date: Option<NaiveDate>,

    /// Calendar table (defaults to files.calendar)
    #[arg(long)]
    pub calendar: Option<PathBuf>,

    /// Discipline list (defaults to files.disciplines)
    #[arg(long)]
    pub disciplines: Option<PathBuf>,

    /// Output table (defaults to files.output)
    #[arg(long, conflicts_with = "json")]
    pub output: Option<PathBuf>,

    /// Read content tables row by row instead of loading them up front
    #[arg(long)]
    pub streaming: bool,

    /// Failed placements allowed per item before the run aborts
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Print entries and summary as JSON instead of writing the output table
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    let start_date = match args.start_date {
        Some(date) => date,
        None => default_start_date(Local::now().date_naive(), config.planner.start_offset_days)?,
    };

    let mut request = PlanRequest::from_config(&config, start_date)?;
    if let Some(calendar) = args.calendar {
        request.calendar = calendar;
    }
    if let Some(disciplines) = args.disciplines {
        request.disciplines = disciplines;
    }
    if args.streaming {
        request.storage = StorageMode::Streaming;
    }
    if let Some(max_attempts) = args.max_attempts {
        request.options.max_attempts = max_attempts;
    }

    if args.json {
        let mut entries: Vec<ScheduledEntry> = Vec::new();
        let summary = run_plan(&request, &mut entries)?;
        let report = serde_json::json!({
            "entries": entries,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // A previous plan is only replaced once both input tables have loaded
    let inputs = PlanInputs::load(&request)?;
    let output = args.output.unwrap_or_else(|| config.files.output.clone());
    let mut sink = match CsvSink::create(&output) {
        Ok(sink) => sink,
        Err(err) => {
            let _ = inputs.close();
            return Err(err.into());
        }
    };
    let summary = inputs.schedule(&request, &mut sink)?;
    sink.into_inner()?;

    print_summary(&summary, &output);
    Ok(())
}

fn print_summary(summary: &RunSummary, output: &Path) {
    println!(
        "planned {} sessions over {} dates -> {}",
        summary.entries,
        summary.dates,
        output.display()
    );
    if let (Some(first), Some(last)) = (summary.first, summary.last) {
        println!("  from {} to {}", first.to_rfc3339(), last.to_rfc3339());
    }

    let width = summary
        .disciplines
        .iter()
        .map(|d| d.name.len())
        .max()
        .unwrap_or(0);
    for total in &summary.disciplines {
        println!(
            "  {:<width$}  {:>4} sessions  {}",
            total.name,
            total.sessions,
            format_duration(total.scheduled),
        );
    }
    if summary.dropped > 0 {
        println!("  {} items dropped for exceeding a daily limit", summary.dropped);
    }
}

