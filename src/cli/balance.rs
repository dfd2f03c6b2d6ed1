//! Initial balance CLI commands

use clap::Subcommand;

use super::parse_amount;
use crate::config::settings::Settings;
use crate::error::TrackerResult;
use crate::services::ProfileService;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum BalanceCommands {
    /// Show the initial balance the ledger starts from
    Show,
    /// Set the initial balance
    Set {
        /// Amount, e.g. "25000"
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

pub fn handle_balance_command(
    storage: &Storage,
    settings: &Settings,
    cmd: BalanceCommands,
) -> TrackerResult<()> {
    let service = ProfileService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        BalanceCommands::Show => {
            println!(
                "Initial balance: {}",
                service.initial_balance()?.format_with_symbol(symbol)
            );
        }
        BalanceCommands::Set { amount } => {
            let amount = parse_amount(&amount, "balance")?;
            service.set_initial_balance(amount)?;
            println!("Initial balance set to {}", amount.format_with_symbol(symbol));
        }
    }

    Ok(())
}
