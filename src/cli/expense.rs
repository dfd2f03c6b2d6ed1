//! Daily expense CLI commands

use clap::Subcommand;

use super::{resolve_date, resolve_month};
use crate::config::settings::Settings;
use crate::display::{format_breakdown, format_expense_list};
use crate::error::{TrackerError, TrackerResult};
use crate::services::ExpenseService;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record an expense; the amount may be an expression like "250+40"
    Add {
        category: String,
        amount: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Date of the expense (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an expense
    Delete {
        /// Expense ID
        expense: String,
    },
    /// Show a month's spending per category
    List {
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Show one category's expenses in a month
    Show {
        category: String,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Rename a category on every expense
    RenameCategory { category: String, new_name: String },
    /// List known categories
    Categories,
}

pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> TrackerResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ExpenseCommands::Add {
            category,
            amount,
            description,
            date,
        } => {
            let date = resolve_date(date.as_deref(), &settings.date_format)?;
            let expense = service.add(&category, date, &description, &amount)?;
            println!(
                "Added {} to {} on {}: {}",
                expense.id,
                expense.category,
                expense.date.format(&settings.date_format),
                expense.amount.format_with_symbol(symbol)
            );
        }

        ExpenseCommands::Delete { expense } => {
            let found = service
                .find(&expense)?
                .ok_or_else(|| TrackerError::daily_expense_not_found(&expense))?;
            let removed = service.delete(found.id)?;
            println!("Deleted {} from {}", removed.id, removed.category);
        }

        ExpenseCommands::List { month } => {
            let month = resolve_month(month.as_deref())?.full_label();
            print!("{}", format_breakdown(&service.breakdown(&month)?, symbol));
        }

        ExpenseCommands::Show { category, month } => {
            let month = resolve_month(month.as_deref())?.full_label();
            let total = service.breakdown(&month)?.total;
            let expenses = service.in_category(&month, &category)?;
            print!(
                "{}",
                format_expense_list(&category, &expenses, total, symbol)
            );
        }

        ExpenseCommands::RenameCategory { category, new_name } => {
            let count = service.rename_category(&category, &new_name)?;
            println!(
                "Renamed {} to {} ({} expenses)",
                category,
                new_name.trim(),
                count
            );
        }

        ExpenseCommands::Categories => {
            for category in service.categories()? {
                println!("  {}", category);
            }
        }
    }

    Ok(())
}
