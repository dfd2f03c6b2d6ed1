//! Credit-card service
//!
//! Item-level edits of card charges, whole-group operations (rename, pay,
//! delete) and the user's card list. Every group operation is one commit.

use tracing::{info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{expression, same_month, CardExpense, CardExpenseId, CardExpensePatch, Month};
use crate::reports::{group_cards, include_cards, order_groups, CardGroupOrder};
use crate::storage::{
    add_to_set, remove_from_set, replace_in_set, Storage, UserData, UserProfile,
};

/// Service for credit-card charges
pub struct CardService<'a> {
    storage: &'a Storage,
}

impl<'a> CardService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    // === Items ===

    /// Add a charge; `expression` is evaluated into the amount
    pub fn add_item(
        &self,
        card_name: &str,
        month: &str,
        description: &str,
        expression: &str,
    ) -> TrackerResult<CardExpense> {
        let card_name = required(card_name, "Card name")?;
        let month = billing_month(month)?;
        let item = CardExpense::new(card_name, month, description.trim(), expression.trim());
        item.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        if expression::is_invalid(&item.expression) {
            warn!(expression = %item.expression, "Unreadable amount expression, recording 0");
        }

        let created = self.storage.transact(|data| {
            if !data.profile.deleted_cards.contains(&item.card_name) {
                add_to_set(&mut data.profile.cards, &item.card_name);
            }
            data.cc_expenses.insert(item.clone());
            Ok(item)
        })?;

        self.storage.log_create(
            EntityType::CardExpense,
            created.id.to_string(),
            Some(created.card_name.clone()),
            &created,
        );

        Ok(created)
    }

    pub fn get_item(&self, id: CardExpenseId) -> TrackerResult<Option<CardExpense>> {
        Ok(self.storage.snapshot()?.cc_expenses.get(id).cloned())
    }

    /// Find a charge by id or id prefix
    pub fn find_item(&self, reference: &str) -> TrackerResult<Option<CardExpense>> {
        Ok(self
            .storage
            .snapshot()?
            .cc_expenses
            .find(|c| c.id.matches(reference))
            .cloned())
    }

    pub fn update_item(
        &self,
        id: CardExpenseId,
        patch: CardExpensePatch,
    ) -> TrackerResult<CardExpense> {
        let (before, after) = self.storage.transact(|data| {
            data.cc_expenses
                .update(id, |item| patch.apply(item))
                .ok_or_else(|| TrackerError::card_expense_not_found(id.to_string()))
        })?;

        self.storage.log_update(
            EntityType::CardExpense,
            after.id.to_string(),
            Some(after.card_name.clone()),
            &before,
            &after,
        );

        Ok(after)
    }

    /// Flip a charge between paid and unpaid
    pub fn toggle_item(&self, id: CardExpenseId) -> TrackerResult<CardExpense> {
        let (before, after) = self.storage.transact(|data| {
            data.cc_expenses
                .update(id, CardExpense::toggle)
                .ok_or_else(|| TrackerError::card_expense_not_found(id.to_string()))
        })?;

        self.storage.log_update(
            EntityType::CardExpense,
            after.id.to_string(),
            Some(after.card_name.clone()),
            &before,
            &after,
        );

        Ok(after)
    }

    pub fn delete_item(&self, id: CardExpenseId) -> TrackerResult<CardExpense> {
        let removed = self.storage.transact(|data| {
            data.cc_expenses
                .remove(id)
                .ok_or_else(|| TrackerError::card_expense_not_found(id.to_string()))
        })?;

        self.storage.log_delete(
            EntityType::CardExpense,
            removed.id.to_string(),
            Some(removed.card_name.clone()),
            &removed,
        );

        Ok(removed)
    }

    // === Groups ===

    /// Active and paid bills for `month`, with empty groups for `extra_cards`
    pub fn groups_for_month(&self, month: &str, extra_cards: &[String]) -> TrackerResult<CardGroupOrder> {
        let snapshot = self.storage.snapshot()?;
        let mut groups = group_cards(snapshot.cc_expenses.as_slice(), month);
        include_cards(&mut groups, extra_cards);
        Ok(order_groups(groups))
    }

    /// Rename one month's group; other months keep the old name
    pub fn rename_group(&self, card_name: &str, month: &str, new_name: &str) -> TrackerResult<usize> {
        let new_name = renamed(card_name, new_name)?;

        let (changes, profile) = self.storage.transact(|data| {
            let changes = data.cc_expenses.update_where(
                |c| c.card_name == card_name && same_month(&c.month, month),
                |c| {
                    c.card_name = new_name.clone();
                    c.touch();
                },
            );
            if changes.is_empty() {
                return Err(TrackerError::card_group_not_found(card_name, month));
            }
            let before = data.profile.clone();
            remove_from_set(&mut data.profile.deleted_cards, &new_name);
            add_to_set(&mut data.profile.cards, &new_name);
            Ok((changes, (before, data.profile.clone())))
        })?;

        info!(from = card_name, to = %new_name, month, count = changes.len(), "renamed card group");
        self.log_group_changes(changes, Some(profile))
    }

    /// Rename a card across every month and in the card list
    pub fn rename_card(&self, old_name: &str, new_name: &str) -> TrackerResult<usize> {
        let new_name = renamed(old_name, new_name)?;

        let (changes, profile) = self.storage.transact(|data| {
            let changes = data.cc_expenses.update_where(
                |c| c.card_name == old_name,
                |c| {
                    c.card_name = new_name.clone();
                    c.touch();
                },
            );
            let known = data.profile.cards.iter().any(|c| c == old_name);
            if changes.is_empty() && !known {
                return Err(TrackerError::NotFound {
                    entity_type: "Card",
                    identifier: old_name.to_string(),
                });
            }
            let before = data.profile.clone();
            replace_in_set(&mut data.profile.cards, old_name, &new_name);
            remove_from_set(&mut data.profile.deleted_cards, &new_name);
            Ok((changes, (before, data.profile.clone())))
        })?;

        info!(from = old_name, to = %new_name, count = changes.len(), "renamed card");
        self.log_group_changes(changes, Some(profile))
    }

    /// Mark every charge in the group as paid or unpaid
    pub fn mark_group_paid(&self, card_name: &str, month: &str, paid: bool) -> TrackerResult<usize> {
        let changes = self.storage.transact(|data| {
            if data
                .cc_expenses
                .find(|c| c.card_name == card_name && same_month(&c.month, month))
                .is_none()
            {
                return Err(TrackerError::card_group_not_found(card_name, month));
            }
            Ok(data.cc_expenses.update_where(
                |c| c.card_name == card_name && same_month(&c.month, month) && c.is_checked != paid,
                |c| {
                    c.is_checked = paid;
                    c.touch();
                },
            ))
        })?;

        info!(card = card_name, month, paid, count = changes.len(), "updated card group");
        self.log_group_changes(changes, None)
    }

    /// Remove every charge in the group
    pub fn delete_group(&self, card_name: &str, month: &str) -> TrackerResult<usize> {
        let removed = self.storage.transact(|data| {
            let removed = data
                .cc_expenses
                .remove_where(|c| c.card_name == card_name && same_month(&c.month, month));
            if removed.is_empty() {
                return Err(TrackerError::card_group_not_found(card_name, month));
            }
            Ok(removed)
        })?;

        info!(card = card_name, month, count = removed.len(), "deleted card group");
        let count = removed.len();
        let audit = removed
            .iter()
            .map(|c| {
                AuditEntry::delete(
                    EntityType::CardExpense,
                    c.id.to_string(),
                    Some(c.card_name.clone()),
                    c,
                )
            })
            .collect();
        self.storage.log_batch(audit);
        Ok(count)
    }

    // === Card list ===

    /// Add a card to the list, undoing an earlier removal
    pub fn add_card(&self, name: &str) -> TrackerResult<bool> {
        let name = required(name, "Card name")?;
        self.update_profile(|data| {
            remove_from_set(&mut data.profile.deleted_cards, &name);
            add_to_set(&mut data.profile.cards, &name)
        })
    }

    /// Drop a card from the list; its charges are kept
    pub fn remove_card(&self, name: &str) -> TrackerResult<bool> {
        let name = name.trim().to_string();
        self.update_profile(|data| {
            let removed = remove_from_set(&mut data.profile.cards, &name);
            add_to_set(&mut data.profile.deleted_cards, &name);
            removed
        })
    }

    /// Known cards, falling back to the names seen in charges
    pub fn card_suggestions(&self) -> TrackerResult<Vec<String>> {
        let snapshot = self.storage.snapshot()?;
        if !snapshot.profile.cards.is_empty() {
            return Ok(snapshot.profile.cards.clone());
        }
        let mut names: Vec<String> = snapshot
            .cc_expenses
            .iter()
            .map(|c| c.card_name.clone())
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    fn update_profile<F>(&self, change: F) -> TrackerResult<bool>
    where
        F: FnOnce(&mut UserData) -> bool,
    {
        let (changed, before, after) = self.storage.transact(|data| {
            let before = data.profile.clone();
            let changed = change(data);
            Ok((changed, before, data.profile.clone()))
        })?;
        self.storage
            .log_update(EntityType::Profile, "profile", None, &before, &after);
        Ok(changed)
    }

    fn log_group_changes(
        &self,
        changes: Vec<(CardExpense, CardExpense)>,
        profile: Option<(UserProfile, UserProfile)>,
    ) -> TrackerResult<usize> {
        let count = changes.len();
        let mut audit: Vec<AuditEntry> = changes
            .iter()
            .map(|(before, after)| {
                AuditEntry::update(
                    EntityType::CardExpense,
                    after.id.to_string(),
                    Some(after.card_name.clone()),
                    before,
                    after,
                )
            })
            .collect();
        if let Some((before, after)) = profile {
            audit.push(AuditEntry::update(
                EntityType::Profile,
                "profile",
                None,
                &before,
                &after,
            ));
        }
        self.storage.log_batch(audit);
        Ok(count)
    }
}

fn required(value: &str, what: &str) -> TrackerResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TrackerError::Validation(format!("{} cannot be empty", what)));
    }
    Ok(value.to_string())
}

/// Validate a rename target
fn renamed(old_name: &str, new_name: &str) -> TrackerResult<String> {
    let new_name = required(new_name, "New card name")?;
    if new_name == old_name {
        return Err(TrackerError::Validation(
            "New card name is the same as the old one".into(),
        ));
    }
    Ok(new_name)
}

/// Full-name billing label for a typed month
fn billing_month(month: &str) -> TrackerResult<String> {
    Month::parse(month)
        .map(|m| m.full_label())
        .ok_or_else(|| {
            TrackerError::Validation(format!(
                "Billing month '{}' is not of the form 'January 2025'",
                month.trim()
            ))
        })
}
