//! Category Aggregator
//!
//! Monthly spending per daily-expense category, plus the two share
//! policies used for display: an integer badge and a one-decimal row value.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{same_month, DailyExpense, Money};

/// Spending in one category for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub name: String,
    pub value: Money,
    pub count: usize,
}

/// Per-category totals for `month`, largest first, ties by name
pub fn aggregate_by_category(expenses: &[DailyExpense], month: &str) -> Vec<CategoryStat> {
    let mut totals: HashMap<&str, (Money, usize)> = HashMap::new();
    for expense in expenses.iter().filter(|e| same_month(&e.month, month)) {
        let slot = totals
            .entry(expense.category.as_str())
            .or_insert((Money::zero(), 0));
        slot.0 += expense.amount;
        slot.1 += 1;
    }

    let mut stats: Vec<CategoryStat> = totals
        .into_iter()
        .map(|(name, (value, count))| CategoryStat {
            name: name.to_string(),
            value,
            count,
        })
        .collect();

    stats.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
    stats
}

/// Everything spent in `month`
pub fn month_total(expenses: &[DailyExpense], month: &str) -> Money {
    expenses
        .iter()
        .filter(|e| same_month(&e.month, month))
        .map(|e| e.amount)
        .sum()
}

/// One category's expenses in `month`, most recent date first
pub fn expenses_in_category<'a>(
    expenses: &'a [DailyExpense],
    month: &str,
    category: &str,
) -> Vec<&'a DailyExpense> {
    let mut matching: Vec<&DailyExpense> = expenses
        .iter()
        .filter(|e| e.category == category && same_month(&e.month, month))
        .collect();
    matching.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
    matching
}

/// Share for the category badge, rounded to a whole percent
pub fn share_badge(value: Money, total: Money) -> i64 {
    value.percent_of(total).round() as i64
}

/// Share for a category row, rounded to one decimal place
pub fn share_row(value: Money, total: Money) -> f64 {
    (value.percent_of(total) * 10.0).round() / 10.0
}
