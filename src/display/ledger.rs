//! Ledger display formatting
//!
//! Formats the running ledger for terminal output in table and detail views.

use tabled::Tabled;

use super::format::render_table;
use crate::models::Money;
use crate::reports::LedgerEntry;

#[derive(Tabled)]
struct LedgerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Salary")]
    salary: String,
    #[tabled(rename = "Expense")]
    expense: String,
    #[tabled(rename = "Savings")]
    savings: String,
    #[tabled(rename = "Total savings")]
    total: String,
}

/// Format the ledger, newest month first
pub fn format_ledger(ledger: &[LedgerEntry], initial_balance: Money, symbol: &str) -> String {
    if ledger.is_empty() {
        return "No monthly entries found.".to_string();
    }

    let rows = ledger
        .iter()
        .map(|row| LedgerRow {
            id: row.entry.id.to_string(),
            month: row.entry.month.clone(),
            salary: row.entry.salary.format_with_symbol(symbol),
            expense: row.entry.expense.format_with_symbol(symbol),
            savings: row.entry.savings.format_with_symbol(symbol),
            total: row.total_savings.format_with_symbol(symbol),
        })
        .collect();

    let mut output = render_table(rows, 2);
    output.push('\n');
    output.push_str(&format!(
        "Initial balance: {}\n",
        initial_balance.format_with_symbol(symbol)
    ));
    output
}

/// Format one ledger row's details
pub fn format_entry_details(row: &LedgerEntry, symbol: &str) -> String {
    let entry = &row.entry;
    let mut output = String::new();

    output.push_str(&format!("Month: {}\n", entry.month));
    output.push_str(&format!("  ID:             {}\n", entry.id));
    output.push_str(&format!(
        "  Salary:         {}\n",
        entry.salary.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Expense:        {}\n",
        entry.expense.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Savings:        {}\n",
        entry.savings.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "  Total savings:  {}\n",
        row.total_savings.format_with_symbol(symbol)
    ));
    output.push('\n');
    output.push_str(&format!(
        "  Created:  {}\n",
        entry.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthlyEntry;
    use crate::reports::build_ledger;

    #[test]
    fn test_format_ledger() {
        let entries = vec![
            MonthlyEntry::new("Jan 2025", Money::from_units(5000), Money::from_units(3000)),
            MonthlyEntry::new("Feb 2025", Money::from_units(5000), Money::from_units(4000)),
        ];
        let ledger = build_ledger(&entries, Money::from_units(100));

        let output = format_ledger(&ledger, Money::from_units(100), "₹");
        assert!(output.contains("Total savings"));
        assert!(output.contains("₹3100.00"));
        assert!(output.find("Feb 2025").unwrap() < output.find("Jan 2025").unwrap());
        assert!(output.contains("Initial balance: ₹100.00"));
    }

    #[test]
    fn test_format_empty_ledger() {
        assert!(format_ledger(&[], Money::zero(), "₹").contains("No monthly entries"));
    }

    #[test]
    fn test_format_entry_details() {
        let entries = vec![MonthlyEntry::new(
            "Mar 2025",
            Money::from_units(10),
            Money::from_units(4),
        )];
        let ledger = build_ledger(&entries, Money::zero());

        let output = format_entry_details(&ledger[0], "$");
        assert!(output.contains("Month: Mar 2025"));
        assert!(output.contains("$6.00"));
    }
}
