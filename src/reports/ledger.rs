//! Running Balance Ledger
//!
//! Turns the unordered monthly entries into a cumulative savings ledger,
//! newest month first.

use serde::Serialize;

use crate::models::{month_key, Money, MonthlyEntry};

/// A monthly entry together with the running total after it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    #[serde(flatten)]
    pub entry: MonthlyEntry,
    /// Initial balance plus every month's savings up to and including this one
    pub total_savings: Money,
}

impl LedgerEntry {
    pub fn month(&self) -> &str {
        &self.entry.month
    }
}

/// Build the ledger, newest month first
///
/// Entries are stable-sorted by [`month_key`] (ties keep input order),
/// accumulated oldest to newest starting from `initial_balance`, and the
/// result is reversed. Unreadable month labels sort as the oldest months.
pub fn build_ledger(entries: &[MonthlyEntry], initial_balance: Money) -> Vec<LedgerEntry> {
    let mut sorted: Vec<&MonthlyEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| month_key(&e.month));

    let mut running = initial_balance;
    let mut ledger: Vec<LedgerEntry> = sorted
        .into_iter()
        .map(|entry| {
            running += entry.savings;
            LedgerEntry {
                entry: entry.clone(),
                total_savings: running,
            }
        })
        .collect();

    ledger.reverse();
    ledger
}

/// The newest running total, or the initial balance for an empty ledger
pub fn current_total_savings(ledger: &[LedgerEntry], initial_balance: Money) -> Money {
    ledger
        .first()
        .map(|e| e.total_savings)
        .unwrap_or(initial_balance)
}
