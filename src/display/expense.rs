//! Daily expense display formatting

use super::format::{format_bar, separator, truncate};
use crate::models::{DailyExpense, Money};
use crate::reports::{share_badge, share_row};
use crate::services::MonthBreakdown;

const BAR_WIDTH: usize = 20;

/// Format a month's spending per category
pub fn format_breakdown(breakdown: &MonthBreakdown, symbol: &str) -> String {
    let mut output = format!(
        "Expenses for {}: {}\n",
        breakdown.month,
        breakdown.total.format_with_symbol(symbol)
    );
    output.push_str(&separator(72));
    output.push('\n');

    if breakdown.stats.is_empty() {
        output.push_str("No expenses found.\n");
        return output;
    }

    let largest = breakdown
        .stats
        .first()
        .map(|s| s.value.as_f64())
        .unwrap_or(0.0);

    for stat in &breakdown.stats {
        output.push_str(&format!(
            "{:<22} {:>14} {:>4}% {:>3}  {}\n",
            truncate(&stat.name, 22),
            stat.value.format_with_symbol(symbol),
            share_badge(stat.value, breakdown.total),
            stat.count,
            format_bar(stat.value.as_f64(), largest, BAR_WIDTH)
        ));
    }

    output
}

/// Format one category's expenses
pub fn format_expense_list(
    category: &str,
    expenses: &[DailyExpense],
    month_total: Money,
    symbol: &str,
) -> String {
    let total: Money = expenses.iter().map(|e| e.amount).sum();
    let mut output = format!(
        "{}: {} ({:.1}% of month)\n",
        category,
        total.format_with_symbol(symbol),
        share_row(total, month_total)
    );

    if expenses.is_empty() {
        output.push_str("No expenses found.\n");
        return output;
    }

    for expense in expenses {
        output.push_str(&format!(
            "  {} {:<24} {:>14}  {}\n",
            expense.date.format("%Y-%m-%d"),
            truncate(&expense.description, 24),
            expense.amount.format_with_symbol(symbol),
            expense.id
        ));
    }

    output
}
