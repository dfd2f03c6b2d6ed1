//! CSV Export functionality
//!
//! Exports the ledger, distributions, card charges and daily expenses as flat
//! tables. Amounts are written as decimal units.

use std::io::Write;

use serde::Serialize;

use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;
use crate::reports::build_ledger;
use crate::storage::UserData;

#[derive(Serialize)]
struct LedgerRow<'a> {
    id: String,
    month: &'a str,
    salary: String,
    expense: String,
    savings: String,
    total_savings: String,
}

#[derive(Serialize)]
struct DistributionRow<'a> {
    id: String,
    name: &'a str,
    amount: String,
    is_salary_account: bool,
}

#[derive(Serialize)]
struct CardRow<'a> {
    id: String,
    card: &'a str,
    month: &'a str,
    description: &'a str,
    expression: &'a str,
    amount: String,
    paid: bool,
}

#[derive(Serialize)]
struct ExpenseRow<'a> {
    id: String,
    date: String,
    month: &'a str,
    category: &'a str,
    description: &'a str,
    expression: &'a str,
    amount: String,
}

fn decimal(amount: Money) -> String {
    amount.to_string()
}

fn write_rows<W: Write, R: Serialize>(writer: W, rows: impl IntoIterator<Item = R>) -> TrackerResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }
    wtr.flush()
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    Ok(())
}

/// Export the ledger, oldest month first
pub fn export_ledger_csv<W: Write>(data: &UserData, writer: W) -> TrackerResult<()> {
    let mut ledger = build_ledger(data.entries.as_slice(), data.profile.initial_balance);
    ledger.reverse();
    write_rows(
        writer,
        ledger.iter().map(|row| LedgerRow {
            id: row.entry.id.to_string(),
            month: &row.entry.month,
            salary: decimal(row.entry.salary),
            expense: decimal(row.entry.expense),
            savings: decimal(row.entry.savings),
            total_savings: decimal(row.total_savings),
        }),
    )
}

pub fn export_distributions_csv<W: Write>(data: &UserData, writer: W) -> TrackerResult<()> {
    write_rows(
        writer,
        data.distributions.iter().map(|item| DistributionRow {
            id: item.id.to_string(),
            name: &item.name,
            amount: decimal(item.amount),
            is_salary_account: item.is_salary_account,
        }),
    )
}

pub fn export_cards_csv<W: Write>(data: &UserData, writer: W) -> TrackerResult<()> {
    write_rows(
        writer,
        data.cc_expenses.iter().map(|item| CardRow {
            id: item.id.to_string(),
            card: &item.card_name,
            month: &item.month,
            description: &item.description,
            expression: &item.expression,
            amount: decimal(item.amount),
            paid: item.is_checked,
        }),
    )
}

pub fn export_expenses_csv<W: Write>(data: &UserData, writer: W) -> TrackerResult<()> {
    let mut expenses: Vec<_> = data.daily_expenses.iter().collect();
    expenses.sort_by_key(|e| (e.date, e.created_at));
    write_rows(
        writer,
        expenses.into_iter().map(|item| ExpenseRow {
            id: item.id.to_string(),
            date: item.date.format("%Y-%m-%d").to_string(),
            month: &item.month,
            category: &item.category,
            description: &item.description,
            expression: &item.expression,
            amount: decimal(item.amount),
        }),
    )
}
