//! Daily expense service

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::audit::{AuditEntry, EntityType};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{expression, DailyExpense, DailyExpenseId, Money};
use crate::reports::{aggregate_by_category, expenses_in_category, month_total, CategoryStat};
use crate::storage::{add_to_set, replace_in_set, Storage};

/// Service for categorized daily expenses
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// One month's category breakdown
#[derive(Debug, Clone)]
pub struct MonthBreakdown {
    pub month: String,
    pub total: Money,
    pub stats: Vec<CategoryStat>,
}

impl<'a> ExpenseService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record an expense and remember its category
    pub fn add(
        &self,
        category: &str,
        date: NaiveDate,
        description: &str,
        expression: &str,
    ) -> TrackerResult<DailyExpense> {
        let expense = DailyExpense::new(category.trim(), date, description.trim(), expression.trim());
        expense
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;
        if expression::is_invalid(&expense.expression) {
            warn!(expression = %expense.expression, "Unreadable amount expression, recording 0");
        }

        let (created, profile) = self.storage.transact(|data| {
            let before = data.profile.clone();
            let added = add_to_set(&mut data.profile.categories, &expense.category);
            data.daily_expenses.insert(expense.clone());
            Ok((expense, added.then(|| (before, data.profile.clone()))))
        })?;

        let mut audit = vec![AuditEntry::create(
            EntityType::DailyExpense,
            created.id.to_string(),
            Some(created.category.clone()),
            &created,
        )];
        if let Some((before, after)) = profile {
            audit.push(AuditEntry::update(EntityType::Profile, "profile", None, &before, &after));
        }
        self.storage.log_batch(audit);

        Ok(created)
    }

    /// Find an expense by id or id prefix
    pub fn find(&self, reference: &str) -> TrackerResult<Option<DailyExpense>> {
        Ok(self
            .storage
            .snapshot()?
            .daily_expenses
            .find(|e| e.id.matches(reference))
            .cloned())
    }

    pub fn delete(&self, id: DailyExpenseId) -> TrackerResult<DailyExpense> {
        let removed = self.storage.transact(|data| {
            data.daily_expenses
                .remove(id)
                .ok_or_else(|| TrackerError::daily_expense_not_found(id.to_string()))
        })?;

        self.storage.log_delete(
            EntityType::DailyExpense,
            removed.id.to_string(),
            Some(removed.category.clone()),
            &removed,
        );

        Ok(removed)
    }

    /// Category totals for a month
    pub fn breakdown(&self, month: &str) -> TrackerResult<MonthBreakdown> {
        let snapshot = self.storage.snapshot()?;
        let expenses = snapshot.daily_expenses.as_slice();
        Ok(MonthBreakdown {
            month: month.to_string(),
            total: month_total(expenses, month),
            stats: aggregate_by_category(expenses, month),
        })
    }

    /// One category's expenses in a month, newest first
    pub fn in_category(&self, month: &str, category: &str) -> TrackerResult<Vec<DailyExpense>> {
        let snapshot = self.storage.snapshot()?;
        Ok(expenses_in_category(snapshot.daily_expenses.as_slice(), month, category)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Known categories
    pub fn categories(&self) -> TrackerResult<Vec<String>> {
        Ok(self.storage.snapshot()?.profile.categories.clone())
    }

    /// Rename a category on every expense and in the category list
    pub fn rename_category(&self, old_name: &str, new_name: &str) -> TrackerResult<usize> {
        let new_name = new_name.trim().to_string();
        if new_name.is_empty() {
            return Err(TrackerError::Validation("Category name cannot be empty".into()));
        }
        if new_name == old_name {
            return Err(TrackerError::Validation(
                "New category name is the same as the old one".into(),
            ));
        }

        let (changes, profile) = self.storage.transact(|data| {
            let changes = data.daily_expenses.update_where(
                |e| e.category == old_name,
                |e| e.category = new_name.clone(),
            );
            let known = data.profile.categories.iter().any(|c| c == old_name);
            if changes.is_empty() && !known {
                return Err(TrackerError::NotFound {
                    entity_type: "Category",
                    identifier: old_name.to_string(),
                });
            }
            let before = data.profile.clone();
            replace_in_set(&mut data.profile.categories, old_name, &new_name);
            Ok((changes, (before, data.profile.clone())))
        })?;

        info!(from = old_name, to = %new_name, count = changes.len(), "renamed category");

        let count = changes.len();
        let mut audit: Vec<AuditEntry> = changes
            .iter()
            .map(|(before, after)| {
                AuditEntry::update(
                    EntityType::DailyExpense,
                    after.id.to_string(),
                    Some(after.category.clone()),
                    before,
                    after,
                )
            })
            .collect();
        audit.push(AuditEntry::update(
            EntityType::Profile,
            "profile",
            None,
            &profile.0,
            &profile.1,
        ));
        self.storage.log_batch(audit);

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, "default").unwrap();
        (temp_dir, storage)
    }

    fn day(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn test_add_derives_month_and_registers_category() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service.add("Travel", day(3, 14), "Cab", "250 + 40").unwrap();
        assert_eq!(expense.month, "March 2025");
        assert_eq!(expense.amount, Money::from_units(290));
        assert!(service.categories().unwrap().contains(&"Travel".to_string()));

        // Default categories are seeded on a new profile
        assert!(service.categories().unwrap().contains(&"Own expense".to_string()));
    }

    #[test]
    fn test_breakdown() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add("Food + Grocery", day(3, 1), "", "300").unwrap();
        service.add("Own expense", day(3, 2), "", "100").unwrap();
        service.add("Food + Grocery", day(3, 3), "", "100").unwrap();
        service.add("Food + Grocery", day(4, 1), "", "999").unwrap();

        let breakdown = service.breakdown("Mar 2025").unwrap();
        assert_eq!(breakdown.total, Money::from_units(500));
        assert_eq!(breakdown.stats[0].name, "Food + Grocery");
        assert_eq!(breakdown.stats[0].value, Money::from_units(400));

        let food = service.in_category("March 2025", "Food + Grocery").unwrap();
        assert_eq!(food.len(), 2);
        assert_eq!(food[0].date, day(3, 3));
    }

    #[test]
    fn test_rename_category_everywhere() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service.add("Room + Other", day(1, 5), "", "10").unwrap();
        service.add("Room + Other", day(2, 5), "", "20").unwrap();

        assert_eq!(service.rename_category("Room + Other", "Housing").unwrap(), 2);

        let snapshot = storage.snapshot().unwrap();
        assert!(snapshot.daily_expenses.iter().all(|e| e.category == "Housing"));
        assert!(snapshot.profile.categories.contains(&"Housing".to_string()));
        assert!(!snapshot.profile.categories.contains(&"Room + Other".to_string()));
    }

    #[test]
    fn test_rename_category_validation() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        assert!(service.rename_category("Own expense", "").unwrap_err().is_validation());
        assert!(service
            .rename_category("Own expense", "Own expense")
            .unwrap_err()
            .is_validation());
        assert!(service.rename_category("Missing", "X").unwrap_err().is_not_found());
        // A known category with no expenses can still be renamed
        assert_eq!(service.rename_category("Own expense", "Personal").unwrap(), 0);
    }

    #[test]
    fn test_delete() {
        let (_temp, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service.add("Food", day(1, 1), "", "5").unwrap();

        assert!(service.find(&expense.id.to_string()).unwrap().is_some());
        service.delete(expense.id).unwrap();
        assert!(service.delete(expense.id).unwrap_err().is_not_found());
    }
}
