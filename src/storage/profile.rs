//! Per-user profile record
//!
//! Holds the initial balance and the user's known category and card names.
//! Lists behave as ordered sets: insertion keeps first-seen order and never
//! duplicates an exact name.

use serde::{Deserialize, Serialize};

use crate::models::money::{deserialize_lenient, Money};

/// Settings and name lists owned by one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Savings held before the first recorded month
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub initial_balance: Money,

    /// Known daily-expense categories
    #[serde(default)]
    pub categories: Vec<String>,

    /// Known credit cards
    #[serde(default)]
    pub cards: Vec<String>,

    /// Cards the user removed; repair never re-adds these
    #[serde(default)]
    pub deleted_cards: Vec<String>,
}

impl UserProfile {
    /// A fresh profile seeded with `categories`
    pub fn seeded(categories: &[String]) -> Self {
        let mut profile = Self::default();
        for category in categories {
            add_to_set(&mut profile.categories, category);
        }
        profile
    }
}

/// Append `name` unless already present. Returns whether it was added.
pub fn add_to_set(set: &mut Vec<String>, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() || set.iter().any(|n| n == name) {
        return false;
    }
    set.push(name.to_string());
    true
}

/// Remove every occurrence of `name`. Returns whether anything was removed.
pub fn remove_from_set(set: &mut Vec<String>, name: &str) -> bool {
    let before = set.len();
    set.retain(|n| n != name);
    set.len() != before
}

/// Replace `old` with `new` in place, keeping position and avoiding duplicates
pub fn replace_in_set(set: &mut Vec<String>, old: &str, new: &str) {
    if set.iter().any(|n| n == new) {
        remove_from_set(set, old);
        return;
    }
    match set.iter().position(|n| n == old) {
        Some(pos) => set[pos] = new.to_string(),
        None => {
            add_to_set(set, new);
        }
    }
}
