//! Credit-card CLI commands
//!
//! Charges are grouped per card and billing month. Group commands take the
//! card name and an optional `--month` (default: the current month).

use clap::Subcommand;

use super::resolve_month;
use crate::config::settings::Settings;
use crate::display::format_card_groups;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{CardExpense, CardExpensePatch, Month};
use crate::services::CardService;
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum CardCommands {
    /// Show a month's card bills
    ///
    /// Cards without charges are listed only for the current month.
    List {
        #[arg(short, long)]
        month: Option<String>,
        /// Also list known cards that have no charges this month
        #[arg(long)]
        all_cards: bool,
    },
    /// Add a charge; the amount may be an expression like "120+30*2"
    Add {
        card: String,
        amount: String,
        #[arg(short, long, default_value = "")]
        description: String,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Edit a charge
    Edit {
        /// Charge ID
        charge: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
    },
    /// Flip a charge between paid and unpaid
    Toggle {
        /// Charge ID
        charge: String,
    },
    /// Delete a charge
    Delete {
        /// Charge ID
        charge: String,
    },
    /// Rename one month's group of a card
    Rename {
        card: String,
        new_name: String,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Rename a card across every month
    RenameCard { card: String, new_name: String },
    /// Delete every charge of a card in one month
    DeleteGroup {
        card: String,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Mark a month's bill as paid
    Pay {
        card: String,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Mark a month's bill as unpaid
    Unpay {
        card: String,
        #[arg(short, long)]
        month: Option<String>,
    },
    /// List known cards
    Cards,
    /// Add a card to the list
    AddCard { name: String },
    /// Remove a card from the list; its charges are kept
    RemoveCard { name: String },
}

fn resolve(service: &CardService, reference: &str) -> TrackerResult<CardExpense> {
    service
        .find_item(reference)?
        .ok_or_else(|| TrackerError::card_expense_not_found(reference))
}

pub fn handle_card_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CardCommands,
) -> TrackerResult<()> {
    let service = CardService::new(storage);
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CardCommands::List { month, all_cards } => {
            let month = resolve_month(month.as_deref())?;
            let cards = if all_cards || month == Month::current() {
                service.card_suggestions()?
            } else {
                Vec::new()
            };
            let month = month.full_label();
            let order = service.groups_for_month(&month, &cards)?;
            print!("{}", format_card_groups(&order, &month, symbol));
        }

        CardCommands::Add {
            card,
            amount,
            description,
            month,
        } => {
            let month = resolve_month(month.as_deref())?.full_label();
            let item = service.add_item(&card, &month, &description, &amount)?;
            println!(
                "Added {} to {} ({}): {}",
                item.id,
                item.card_name,
                item.month,
                item.amount.format_with_symbol(symbol)
            );
        }

        CardCommands::Edit {
            charge,
            description,
            amount,
        } => {
            let found = resolve(&service, &charge)?;
            let patch = CardExpensePatch {
                description,
                expression: amount,
                is_checked: None,
            };
            if patch.is_empty() {
                println!("No changes specified. Use --description or --amount.");
                return Ok(());
            }
            let updated = service.update_item(found.id, patch)?;
            println!(
                "Updated {}: {}",
                updated.id,
                updated.amount.format_with_symbol(symbol)
            );
        }

        CardCommands::Toggle { charge } => {
            let found = resolve(&service, &charge)?;
            let toggled = service.toggle_item(found.id)?;
            let state = if toggled.is_checked { "paid" } else { "unpaid" };
            println!("Marked {} as {}", toggled.id, state);
        }

        CardCommands::Delete { charge } => {
            let found = resolve(&service, &charge)?;
            let removed = service.delete_item(found.id)?;
            println!("Deleted {} from {}", removed.id, removed.card_name);
        }

        CardCommands::Rename {
            card,
            new_name,
            month,
        } => {
            let month = resolve_month(month.as_deref())?.full_label();
            let count = service.rename_group(&card, &month, &new_name)?;
            println!(
                "Renamed {} to {} for {} ({} charges)",
                card,
                new_name.trim(),
                month,
                count
            );
        }

        CardCommands::RenameCard { card, new_name } => {
            let count = service.rename_card(&card, &new_name)?;
            println!("Renamed {} to {} ({} charges)", card, new_name.trim(), count);
        }

        CardCommands::DeleteGroup { card, month } => {
            let month = resolve_month(month.as_deref())?.full_label();
            let count = service.delete_group(&card, &month)?;
            println!("Deleted {} charges of {} for {}", count, card, month);
        }

        CardCommands::Pay { card, month } => {
            let month = resolve_month(month.as_deref())?.full_label();
            let count = service.mark_group_paid(&card, &month, true)?;
            println!("Marked {} bill for {} as paid ({} charges)", card, month, count);
        }

        CardCommands::Unpay { card, month } => {
            let month = resolve_month(month.as_deref())?.full_label();
            let count = service.mark_group_paid(&card, &month, false)?;
            println!("Marked {} bill for {} as unpaid ({} charges)", card, month, count);
        }

        CardCommands::Cards => {
            let cards = service.card_suggestions()?;
            if cards.is_empty() {
                println!("No cards found.");
            }
            for card in cards {
                println!("  {}", card);
            }
        }

        CardCommands::AddCard { name } => {
            if service.add_card(&name)? {
                println!("Added card {}", name.trim());
            } else {
                println!("Card {} is already listed", name.trim());
            }
        }

        CardCommands::RemoveCard { name } => {
            if service.remove_card(&name)? {
                println!("Removed card {}", name.trim());
            } else {
                println!("Card {} was not listed", name.trim());
            }
        }
    }

    Ok(())
}
