use chrono::Local;
use clap::Subcommand;
use pomotimer_core::stats::{DEFAULT_REPORT_DAYS, MAX_REPORT_DAYS};
use pomotimer_core::{DailyStats, StatsDb, WeeklyReport};

use crate::render;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Per-day counts for the trailing days, as a bar chart
    Week {
        /// How many days back from today (at most a year)
        #[arg(
            long,
            default_value_t = DEFAULT_REPORT_DAYS,
            value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_REPORT_DAYS))
        )]
        days: u32,
        /// Print JSON instead of the chart
        #[arg(long)]
        json: bool,
    },
    /// Today's counts
    Today,
    /// Delete all recorded statistics
    Reset {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = StatsDb::open()?;
    let today = Local::now().date_naive();

    match action {
        StatsAction::Week { days, json } => {
            let rows = db.query_last_n_days(days, today)?;
            let report = WeeklyReport::build(&rows, today, days);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render::bar_chart(&report));
            }
        }
        StatsAction::Today => {
            let stats = db.day(today)?.unwrap_or_else(|| DailyStats::empty(today));
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        StatsAction::Reset { yes } => {
            if !yes {
                return Err("refusing to delete statistics without --yes".into());
            }
            let removed = db.reset_all()?;
            println!("removed {removed} day(s) of statistics");
        }
    }
    Ok(())
}
