//! Profile service
//!
//! Initial balance, the category and card lists, and the repair pass that
//! brings those lists in line with the stored history.

use tracing::info;

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::Money;
use crate::storage::{add_to_set, remove_from_set, Storage, UserData, UserProfile};

/// Service for the user profile
pub struct ProfileService<'a> {
    storage: &'a Storage,
}

/// Names added by a repair pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub added_categories: Vec<String>,
    pub added_cards: Vec<String>,
}

impl RepairReport {
    pub fn is_empty(&self) -> bool {
        self.added_categories.is_empty() && self.added_cards.is_empty()
    }
}

impl<'a> ProfileService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn profile(&self) -> TrackerResult<UserProfile> {
        Ok(self.storage.snapshot()?.profile.clone())
    }

    pub fn initial_balance(&self) -> TrackerResult<Money> {
        Ok(self.storage.snapshot()?.profile.initial_balance)
    }

    pub fn set_initial_balance(&self, amount: Money) -> TrackerResult<()> {
        self.change(|profile| {
            profile.initial_balance = amount;
            Ok(())
        })
    }

    pub fn add_category(&self, name: &str) -> TrackerResult<()> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(TrackerError::Validation("Category name cannot be empty".into()));
        }
        self.change(|profile| {
            if !add_to_set(&mut profile.categories, &name) {
                return Err(TrackerError::Duplicate {
                    entity_type: "Category",
                    identifier: name.clone(),
                });
            }
            Ok(())
        })
    }

    /// Forget a category; expenses that use it are kept
    pub fn remove_category(&self, name: &str) -> TrackerResult<()> {
        self.change(|profile| {
            if !remove_from_set(&mut profile.categories, name) {
                return Err(TrackerError::NotFound {
                    entity_type: "Category",
                    identifier: name.to_string(),
                });
            }
            Ok(())
        })
    }

    /// Add names found in the history but missing from the profile lists
    ///
    /// Categories come from daily expenses. Cards come from card charges,
    /// skipping cards the user removed. Running it twice adds nothing the
    /// second time.
    pub fn repair(&self) -> TrackerResult<RepairReport> {
        let snapshot = self.storage.snapshot()?;
        if missing_names(&snapshot.profile, &snapshot).is_empty() {
            return Ok(RepairReport::default());
        }

        let (report, before, after) = self.storage.transact(|data| {
            let before = data.profile.clone();
            let mut report = RepairReport::default();

            let categories: Vec<String> =
                data.daily_expenses.iter().map(|e| e.category.clone()).collect();
            for category in categories {
                if add_to_set(&mut data.profile.categories, &category) {
                    report.added_categories.push(category);
                }
            }

            let cards: Vec<String> = data.cc_expenses.iter().map(|c| c.card_name.clone()).collect();
            for card in cards {
                if data.profile.deleted_cards.contains(&card) {
                    continue;
                }
                if add_to_set(&mut data.profile.cards, &card) {
                    report.added_cards.push(card);
                }
            }

            Ok((report, before, data.profile.clone()))
        })?;

        info!(
            categories = report.added_categories.len(),
            cards = report.added_cards.len(),
            "repaired profile lists"
        );
        self.storage
            .log_update(EntityType::Profile, "profile", None, &before, &after);

        Ok(report)
    }

    fn change<F>(&self, apply: F) -> TrackerResult<()>
    where
        F: FnOnce(&mut UserProfile) -> TrackerResult<()>,
    {
        let (before, after) = self.storage.transact(|data| {
            let before = data.profile.clone();
            apply(&mut data.profile)?;
            Ok((before, data.profile.clone()))
        })?;
        self.storage
            .log_update(EntityType::Profile, "profile", None, &before, &after);
        Ok(())
    }
}

/// Names in the history that are absent from the lists
fn missing_names(profile: &UserProfile, data: &UserData) -> Vec<String> {
    let categories = data
        .daily_expenses
        .iter()
        .map(|e| e.category.trim())
        .filter(|c| !c.is_empty() && !profile.categories.iter().any(|k| k == c));
    let cards = data
        .cc_expenses
        .iter()
        .map(|c| c.card_name.trim())
        .filter(|c| {
            !c.is_empty()
                && !profile.cards.iter().any(|k| k == c)
                && !profile.deleted_cards.iter().any(|k| k == c)
        });
    categories.chain(cards).map(str::to_string).collect()
}
