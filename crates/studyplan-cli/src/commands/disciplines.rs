use std::path::PathBuf;

use clap::Subcommand;
use studyplan_core::{close_all, format_duration, load_disciplines, Config, StorageMode};

#[derive(Subcommand)]
pub enum DisciplinesAction {
    /// List disciplines with their pacing and total content time
    List {
        /// Discipline list (defaults to files.disciplines)
        #[arg(long)]
        disciplines: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: DisciplinesAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DisciplinesAction::List { disciplines, json } => {
            let config = Config::load()?;
            let path = disciplines.unwrap_or_else(|| config.files.disciplines.clone());
            let mut loaded = load_disciplines(&path, StorageMode::Materialized)?;

            let rows: Vec<serde_json::Value> = loaded
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "name": d.name,
                        "source": d.source,
                        "daily_limit": format_duration(d.daily_limit),
                        "content_gap": format_duration(d.content_gap),
                        "subject_gap": format_duration(d.subject_gap),
                        "items": d.item_count().unwrap_or(0),
                        "total": d.total_duration().map(format_duration),
                    })
                })
                .collect();
            close_all(&mut loaded)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }

            for d in &loaded {
                println!(
                    "{}  ({})  limit {}  gaps {}/{}  {} items  {}",
                    d.name,
                    d.source,
                    format_duration(d.daily_limit),
                    format_duration(d.content_gap),
                    format_duration(d.subject_gap),
                    d.item_count().unwrap_or(0),
                    d.total_duration().map(format_duration).unwrap_or_default(),
                );
            }
        }
    }
    Ok(())
}
