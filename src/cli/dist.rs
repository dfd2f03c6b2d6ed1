//! Distribution CLI commands
//!
//! Every listing ends with the reconciliation against the current total
//! savings.

use clap::{Subcommand, ValueEnum};

use super::parse_amount;
use crate::config::settings::Settings;
use crate::display::format_distribution_overview;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{DistributionItem, DistributionPatch};
use crate::reports::{SortDirection, SortKey};
use crate::services::DistributionService;
use crate::storage::Storage;

/// Sort field for `dist list`
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortField {
    Amount,
    Name,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::Amount => SortKey::Amount,
            SortField::Name => SortKey::Name,
        }
    }
}

#[derive(Subcommand)]
pub enum DistCommands {
    /// Add a distribution item
    Add {
        /// Where the money sits, e.g. "Mutual funds"
        name: String,
        /// Amount held there
        amount: String,
        /// Mark as the salary account
        #[arg(long)]
        salary: bool,
    },
    /// Edit a distribution item
    Edit {
        /// Item ID or name
        item: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        /// Set or clear the salary-account flag
        #[arg(long)]
        salary: Option<bool>,
    },
    /// Delete a distribution item
    Delete {
        /// Item ID or name
        item: String,
    },
    /// List items with the reconciliation summary
    List {
        #[arg(short, long, value_enum, default_value = "amount")]
        sort: SortField,
        /// Sort ascending instead of descending
        #[arg(long)]
        asc: bool,
    },
}

fn resolve(service: &DistributionService, reference: &str) -> TrackerResult<DistributionItem> {
    service
        .find(reference)?
        .ok_or_else(|| TrackerError::distribution_not_found(reference))
}

pub fn handle_dist_command(
    storage: &Storage,
    settings: &Settings,
    cmd: DistCommands,
) -> TrackerResult<()> {
    let service = DistributionService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        DistCommands::Add {
            name,
            amount,
            salary,
        } => {
            let amount = parse_amount(&amount, "amount")?;
            let item = service.create(&name, amount, salary)?;
            println!("Added {}: {}", item, item.amount.format_with_symbol(symbol));
            println!("{}", service.reconcile()?.summary(symbol));
        }

        DistCommands::Edit {
            item,
            name,
            amount,
            salary,
        } => {
            let found = resolve(&service, &item)?;
            let patch = DistributionPatch {
                name,
                amount: amount
                    .as_deref()
                    .map(|a| parse_amount(a, "amount"))
                    .transpose()?,
                is_salary_account: salary,
            };

            if patch.is_empty() {
                println!("No changes specified. Use --name, --amount or --salary.");
                return Ok(());
            }

            let updated = service.update(found.id, patch)?;
            println!(
                "Updated {}: {}",
                updated,
                updated.amount.format_with_symbol(symbol)
            );
            println!("{}", service.reconcile()?.summary(symbol));
        }

        DistCommands::Delete { item } => {
            let found = resolve(&service, &item)?;
            let removed = service.delete(found.id)?;
            println!("Deleted {}", removed.name);
        }

        DistCommands::List { sort, asc } => {
            let direction = if asc {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            };
            let overview = service.overview(sort.into(), direction)?;
            print!("{}", format_distribution_overview(&overview, symbol));
        }
    }

    Ok(())
}
