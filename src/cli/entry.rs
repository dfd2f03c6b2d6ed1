//! Monthly entry CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::settings::Settings;
use crate::display::{format_entry_details, format_ledger};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{EntryPatch, MonthlyEntry};
use crate::services::EntryService;
use crate::storage::Storage;

/// Monthly entry subcommands
#[derive(Subcommand)]
pub enum EntryCommands {
    /// Record a month's salary and expense
    Add {
        /// Month label, e.g. "Jan 2025" (default: the month after the newest entry)
        #[arg(short, long)]
        month: Option<String>,
        /// Salary (default: the newest entry's salary)
        #[arg(short, long, allow_hyphen_values = true)]
        salary: Option<String>,
        /// Expense
        #[arg(short, long, default_value = "0", allow_hyphen_values = true)]
        expense: String,
    },
    /// Edit an entry
    Edit {
        /// Entry ID or month label
        entry: String,
        /// New month label
        #[arg(short, long)]
        month: Option<String>,
        /// New salary
        #[arg(short, long, allow_hyphen_values = true)]
        salary: Option<String>,
        /// New expense
        #[arg(short, long, allow_hyphen_values = true)]
        expense: Option<String>,
    },
    /// Delete an entry
    Delete {
        /// Entry ID or month label
        entry: String,
    },
    /// Show the ledger, newest month first
    List,
    /// Show one entry with its running total
    Show {
        /// Entry ID or month label
        entry: String,
    },
}

fn resolve(service: &EntryService, reference: &str) -> TrackerResult<MonthlyEntry> {
    service
        .find(reference)?
        .ok_or_else(|| TrackerError::entry_not_found(reference))
}

/// Handle an entry command
pub fn handle_entry_command(
    storage: &Storage,
    settings: &Settings,
    cmd: EntryCommands,
) -> TrackerResult<()> {
    let service = EntryService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        EntryCommands::Add {
            month,
            salary,
            expense,
        } => {
            let month = match month {
                Some(label) => label,
                None => service.next_month()?.short_label(),
            };
            let salary = match salary {
                Some(text) => parse_amount(&text, "salary")?,
                None => service.suggested_salary()?.ok_or_else(|| {
                    TrackerError::Validation(
                        "No previous entry to take the salary from. Pass --salary".into(),
                    )
                })?,
            };
            let expense = parse_amount(&expense, "expense")?;

            let entry = service.create(&month, salary, expense)?;
            println!("Recorded {}", entry.month);
            println!("  Salary:  {}", entry.salary.format_with_symbol(symbol));
            println!("  Expense: {}", entry.expense.format_with_symbol(symbol));
            println!("  Savings: {}", entry.savings.format_with_symbol(symbol));
            println!("  ID: {}", entry.id);
        }

        EntryCommands::Edit {
            entry,
            month,
            salary,
            expense,
        } => {
            let found = resolve(&service, &entry)?;
            let patch = EntryPatch {
                month,
                salary: salary
                    .as_deref()
                    .map(|s| parse_amount(s, "salary"))
                    .transpose()?,
                expense: expense
                    .as_deref()
                    .map(|s| parse_amount(s, "expense"))
                    .transpose()?,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --month, --salary or --expense.");
                return Ok(());
            }

            let updated = service.update(found.id, patch)?;
            println!(
                "Updated {}: savings {}",
                updated.month,
                updated.savings.format_with_symbol(symbol)
            );
        }

        EntryCommands::Delete { entry } => {
            let found = resolve(&service, &entry)?;
            let removed = service.delete(found.id)?;
            println!("Deleted entry for {}", removed.month);
        }

        EntryCommands::List => {
            let ledger = service.ledger()?;
            let initial = storage.snapshot()?.profile.initial_balance;
            println!("{}", format_ledger(&ledger, initial, symbol));
        }

        EntryCommands::Show { entry } => {
            let found = resolve(&service, &entry)?;
            let ledger = service.ledger()?;
            let row = ledger
                .iter()
                .find(|row| row.entry.id == found.id)
                .ok_or_else(|| TrackerError::entry_not_found(&entry))?;
            print!("{}", format_entry_details(row, symbol));
        }
    }

    Ok(())
}
