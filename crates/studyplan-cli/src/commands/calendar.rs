use std::path::PathBuf;

use chrono::Weekday;
use clap::Subcommand;
use studyplan_core::calendar::WEEKDAYS;
use studyplan_core::{load_calendar, Config};

#[derive(Subcommand)]
pub enum CalendarAction {
    /// Print the merged windows of every weekday
    Show {
        /// Calendar table (defaults to files.calendar)
        #[arg(long)]
        calendar: Option<PathBuf>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: CalendarAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CalendarAction::Show { calendar, json } => {
            let config = Config::load()?;
            let path = calendar.unwrap_or_else(|| config.files.calendar.clone());
            let calendar = load_calendar(&path, config.utc_offset()?)?;

            if json {
                let days: Vec<_> = WEEKDAYS
                    .iter()
                    .map(|&day| {
                        serde_json::json!({
                            "weekday": weekday_name(day),
                            "windows": calendar.windows(day),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&days)?);
                return Ok(());
            }

            println!("UTC offset {}", calendar.offset());
            for day in WEEKDAYS {
                let windows: Vec<String> = calendar
                    .windows(day)
                    .iter()
                    .map(|w| format!("{}-{}", w.start.format("%H:%M"), w.end.format("%H:%M")))
                    .collect();
                let listed = if windows.is_empty() {
                    "-".to_string()
                } else {
                    windows.join(", ")
                };
                println!("{:<10} {listed}", weekday_name(day));
            }
        }
    }
    Ok(())
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}
