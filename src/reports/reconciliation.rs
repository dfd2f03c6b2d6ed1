//! Distribution Reconciler
//!
//! Compares the savings total against what the user has declared as
//! distributed. Amounts are whole cents, so "balanced" is exact equality.

use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use crate::models::{DistributionItem, Money};

/// Outcome of comparing a target against its distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub target: Money,
    pub total_distributed: Money,
    /// `target - total_distributed`
    pub difference: Money,
    pub is_balanced: bool,
}

/// How the distributions relate to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceStatus {
    Balanced,
    /// Part of the target is not assigned anywhere
    Unallocated,
    /// More is assigned than the target holds
    OverAllocated,
}

impl fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BalanceStatus::Balanced => write!(f, "Balanced"),
            BalanceStatus::Unallocated => write!(f, "Unallocated"),
            BalanceStatus::OverAllocated => write!(f, "Over-allocated"),
        }
    }
}

impl Reconciliation {
    pub fn status(&self) -> BalanceStatus {
        match self.difference.cents().cmp(&0) {
            Ordering::Equal => BalanceStatus::Balanced,
            Ordering::Greater => BalanceStatus::Unallocated,
            Ordering::Less => BalanceStatus::OverAllocated,
        }
    }

    /// One-line summary such as "Over-allocated by 100.00"
    pub fn summary(&self, symbol: &str) -> String {
        match self.status() {
            BalanceStatus::Balanced => "Balanced".to_string(),
            status => format!(
                "{} by {}",
                status,
                self.difference.abs().format_with_symbol(symbol)
            ),
        }
    }
}

/// Reconcile `target` against the distribution amounts
pub fn reconcile(target: Money, distributions: &[DistributionItem]) -> Reconciliation {
    let total_distributed: Money = distributions.iter().map(|d| d.amount).sum();
    let difference = target - total_distributed;
    Reconciliation {
        target,
        total_distributed,
        difference,
        is_balanced: difference.is_zero(),
    }
}

/// Field to order distributions by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Amount,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

/// Sort distributions for display; names compare case-insensitively
pub fn sort_distributions(items: &mut [DistributionItem], key: SortKey, direction: SortDirection) {
    items.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Amount => a.amount.cmp(&b.amount),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(amounts: &[i64]) -> Vec<DistributionItem> {
        amounts
            .iter()
            .enumerate()
            .map(|(i, a)| DistributionItem::new(format!("Item {}", i), Money::from_units(*a)))
            .collect()
    }

    #[test]
    fn test_empty_distributions() {
        let r = reconcile(Money::from_units(250), &[]);
        assert_eq!(r.total_distributed, Money::zero());
        assert_eq!(r.difference, Money::from_units(250));
        assert!(!r.is_balanced);

        assert!(reconcile(Money::zero(), &[]).is_balanced);
    }

    #[test]
    fn test_balanced_and_over_allocated() {
        let dist = items(&[600, 400]);

        let balanced = reconcile(Money::from_units(1000), &dist);
        assert_eq!(balanced.difference, Money::zero());
        assert!(balanced.is_balanced);
        assert_eq!(balanced.status(), BalanceStatus::Balanced);

        let over = reconcile(Money::from_units(900), &dist);
        assert_eq!(over.difference, Money::from_units(-100));
        assert!(!over.is_balanced);
        assert_eq!(over.status(), BalanceStatus::OverAllocated);
        assert_eq!(over.summary("₹"), "Over-allocated by ₹100.00");
    }

    #[test]
    fn test_unallocated() {
        let r = reconcile(Money::from_units(1200), &items(&[600, 400]));
        assert_eq!(r.status(), BalanceStatus::Unallocated);
        assert_eq!(r.summary("$"), "Unallocated by $200.00");
    }

    #[test]
    fn test_fractional_amounts_stay_exact() {
        let dist: Vec<_> = (0..10)
            .map(|_| DistributionItem::new("Tenth", Money::from_f64(0.1)))
            .collect();
        assert!(reconcile(Money::from_units(1), &dist).is_balanced);
    }

    #[test]
    fn test_sorting() {
        let mut dist = vec![
            DistributionItem::new("bonds", Money::from_units(5)),
            DistributionItem::new("Gold", Money::from_units(50)),
            DistributionItem::new("cash", Money::from_units(20)),
        ];

        sort_distributions(&mut dist, SortKey::default(), SortDirection::default());
        let names: Vec<_> = dist.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Gold", "cash", "bonds"]);

        sort_distributions(&mut dist, SortKey::Name, SortDirection::Ascending);
        let names: Vec<_> = dist.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["bonds", "cash", "Gold"]);
    }
}
