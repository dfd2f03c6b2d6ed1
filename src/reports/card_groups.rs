//! Credit-Card Group Aggregator
//!
//! Groups one month's card charges per card, totals them and splits the
//! groups into active and paid bills.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{same_month, CardExpense, Money};

/// All charges of one card in one billing month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardGroup {
    pub card_name: String,
    /// Unchecked first, then checked; each by creation time ascending
    pub items: Vec<CardExpense>,
    /// Outstanding amount: sum of unchecked charges
    pub total: Money,
    /// Sum of every charge
    pub grand_total: Money,
    /// True when the group has charges and all of them are checked
    pub all_paid: bool,
    /// Latest modification across the charges, epoch milliseconds (0 if empty)
    pub last_activity: i64,
}

impl CardGroup {
    /// Placeholder for a card with no charges this month
    pub fn empty(card_name: impl Into<String>) -> Self {
        Self {
            card_name: card_name.into(),
            items: Vec::new(),
            total: Money::zero(),
            grand_total: Money::zero(),
            all_paid: false,
            last_activity: 0,
        }
    }

    fn from_items(card_name: String, mut items: Vec<CardExpense>) -> Self {
        items.sort_by(|a, b| {
            a.is_checked
                .cmp(&b.is_checked)
                .then(a.created_at.cmp(&b.created_at))
        });

        let grand_total = items.iter().map(|i| i.amount).sum();
        let total = items.iter().filter(|i| !i.is_checked).map(|i| i.amount).sum();
        let all_paid = !items.is_empty() && items.iter().all(|i| i.is_checked);
        let last_activity = items
            .iter()
            .map(|i| i.last_activity().timestamp_millis())
            .max()
            .unwrap_or(0);

        Self {
            card_name,
            items,
            total,
            grand_total,
            all_paid,
            last_activity,
        }
    }

    /// Amount shown for the bill: the full total once paid, else what is outstanding
    pub fn displayed_total(&self) -> Money {
        if self.all_paid {
            self.grand_total
        } else {
            self.total
        }
    }

    pub fn is_active(&self) -> bool {
        !self.all_paid
    }
}

/// Group `month`'s charges by card name
pub fn group_cards(expenses: &[CardExpense], month: &str) -> BTreeMap<String, CardGroup> {
    let mut buckets: BTreeMap<String, Vec<CardExpense>> = BTreeMap::new();
    for expense in expenses.iter().filter(|e| same_month(&e.month, month)) {
        buckets
            .entry(expense.card_name.clone())
            .or_default()
            .push(expense.clone());
    }

    buckets
        .into_iter()
        .map(|(name, items)| (name.clone(), CardGroup::from_items(name, items)))
        .collect()
}

/// Add empty groups for cards that have no charges yet
pub fn include_cards<'a, I>(groups: &mut BTreeMap<String, CardGroup>, card_names: I)
where
    I: IntoIterator<Item = &'a String>,
{
    for name in card_names {
        groups
            .entry(name.clone())
            .or_insert_with(|| CardGroup::empty(name.clone()));
    }
}

/// Groups split for display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CardGroupOrder {
    pub active: Vec<CardGroup>,
    pub paid: Vec<CardGroup>,
}

impl CardGroupOrder {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.paid.is_empty()
    }

    /// Outstanding across all active groups
    pub fn outstanding(&self) -> Money {
        self.active.iter().map(|g| g.total).sum()
    }
}

/// Partition into active and paid, each most recently touched first
///
/// Empty groups are always active. Ties fall back to the card name,
/// compared case-insensitively.
pub fn order_groups(groups: BTreeMap<String, CardGroup>) -> CardGroupOrder {
    let (mut active, mut paid): (Vec<_>, Vec<_>) =
        groups.into_values().partition(CardGroup::is_active);

    active.sort_by(compare_groups);
    paid.sort_by(compare_groups);

    CardGroupOrder { active, paid }
}

fn compare_groups(a: &CardGroup, b: &CardGroup) -> Ordering {
    b.last_activity
        .cmp(&a.last_activity)
        .then_with(|| a.card_name.to_lowercase().cmp(&b.card_name.to_lowercase()))
}
