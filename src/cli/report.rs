//! CLI commands for reports
//!
//! The dashboard and the month-by-month trend series, both derived from the
//! ledger.

use clap::Subcommand;

use super::parse_amount;
use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::reports::trends;
use crate::services::EntryService;
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Totals and averages across the ledger
    Dashboard {
        /// Limit yearly savings to one year
        #[arg(short, long)]
        year: Option<i32>,

        /// Limit the averages to months with this salary
        #[arg(short, long)]
        salary: Option<String>,
    },

    /// Salary, expense and savings per month, oldest first
    Trends,
}

pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> TrackerResult<()> {
    let service = EntryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Dashboard { year, salary } => {
            let salary = salary
                .as_deref()
                .map(|s| parse_amount(s, "salary"))
                .transpose()?;
            let summary = service.dashboard(year, salary)?;
            print!("{}", summary.format_terminal(symbol));
        }
        ReportCommands::Trends => {
            let points = service.trends()?;
            if points.is_empty() {
                println!("No monthly entries found.");
            } else {
                print!("{}", trends::format_terminal(&points, symbol));
            }
        }
    }

    Ok(())
}
