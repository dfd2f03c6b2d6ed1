//! Display formatting for terminal output
//!
//! Provides utilities for formatting ledger rows, distributions, card bills
//! and expense breakdowns for terminal display.

pub mod audit;
pub mod card;
pub mod distribution;
pub mod expense;
pub mod format;
pub mod ledger;

pub use audit::format_audit_list;
pub use card::{format_card_group, format_card_groups};
pub use distribution::format_distribution_overview;
pub use expense::{format_breakdown, format_expense_list};
pub use ledger::{format_entry_details, format_ledger};
