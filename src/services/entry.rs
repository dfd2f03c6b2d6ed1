//! Monthly entry service
//!
//! Creates, edits and deletes monthly salary/expense entries and builds the
//! ledger-derived views (dashboard, trends) from a single snapshot.

use crate::audit::EntityType;
use crate::error::{TrackerError, TrackerResult};
use crate::models::{same_month, EntryId, EntryPatch, Money, Month, MonthlyEntry};
use crate::reports::{
    build_ledger, suggested_salary, trend_series, DashboardSummary, LedgerEntry, TrendPoint,
};
use crate::storage::{Storage, UserData};

/// Service for monthly entries
pub struct EntryService<'a> {
    storage: &'a Storage,
}

impl<'a> EntryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a month; savings are salary minus expense
    ///
    /// The label is stored in its short form ("Jan 2025"). A second entry for
    /// the same month is rejected.
    pub fn create(&self, month: &str, salary: Money, expense: Money) -> TrackerResult<MonthlyEntry> {
        let label = canonical_label(month)?;
        let entry = MonthlyEntry::new(label, salary, expense);
        entry
            .validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let created = self.storage.transact(|data| {
            ensure_month_free(data, &entry.month, None)?;
            data.entries.insert(entry.clone());
            Ok(entry)
        })?;

        self.storage.log_create(
            EntityType::MonthlyEntry,
            created.id.to_string(),
            Some(created.month.clone()),
            &created,
        );

        Ok(created)
    }

    pub fn get(&self, id: EntryId) -> TrackerResult<Option<MonthlyEntry>> {
        Ok(self.storage.snapshot()?.entries.get(id).cloned())
    }

    /// Find an entry by id, id prefix, or month label
    pub fn find(&self, reference: &str) -> TrackerResult<Option<MonthlyEntry>> {
        let snapshot = self.storage.snapshot()?;
        if let Some(entry) = snapshot.entries.find(|e| e.id.matches(reference)) {
            return Ok(Some(entry.clone()));
        }
        Ok(snapshot
            .entries
            .find(|e| same_month(&e.month, reference))
            .cloned())
    }

    /// Entries in stored order
    pub fn list(&self) -> TrackerResult<Vec<MonthlyEntry>> {
        Ok(self.storage.snapshot()?.entries.as_slice().to_vec())
    }

    /// The running ledger, newest first
    pub fn ledger(&self) -> TrackerResult<Vec<LedgerEntry>> {
        let snapshot = self.storage.snapshot()?;
        Ok(build_ledger(
            snapshot.entries.as_slice(),
            snapshot.profile.initial_balance,
        ))
    }

    /// Apply `patch` to an entry
    pub fn update(&self, id: EntryId, patch: EntryPatch) -> TrackerResult<MonthlyEntry> {
        let patch = EntryPatch {
            month: patch.month.as_deref().map(canonical_label).transpose()?,
            ..patch
        };

        let (before, after) = self.storage.transact(|data| {
            if let Some(month) = &patch.month {
                ensure_month_free(data, month, Some(id))?;
            }
            data.entries
                .update(id, |entry| patch.apply(entry))
                .ok_or_else(|| TrackerError::entry_not_found(id.to_string()))
        })?;

        self.storage.log_update(
            EntityType::MonthlyEntry,
            after.id.to_string(),
            Some(after.month.clone()),
            &before,
            &after,
        );

        Ok(after)
    }

    pub fn delete(&self, id: EntryId) -> TrackerResult<MonthlyEntry> {
        let removed = self.storage.transact(|data| {
            data.entries
                .remove(id)
                .ok_or_else(|| TrackerError::entry_not_found(id.to_string()))
        })?;

        self.storage.log_delete(
            EntityType::MonthlyEntry,
            removed.id.to_string(),
            Some(removed.month.clone()),
            &removed,
        );

        Ok(removed)
    }

    /// Dashboard figures, optionally for one year and one salary level
    pub fn dashboard(
        &self,
        year: Option<i32>,
        salary: Option<Money>,
    ) -> TrackerResult<DashboardSummary> {
        let snapshot = self.storage.snapshot()?;
        let initial = snapshot.profile.initial_balance;
        let ledger = build_ledger(snapshot.entries.as_slice(), initial);
        Ok(DashboardSummary::compute(&ledger, initial, year, salary))
    }

    pub fn trends(&self) -> TrackerResult<Vec<TrendPoint>> {
        Ok(trend_series(self.storage.snapshot()?.entries.as_slice()))
    }

    /// Salary to prefill for the next entry
    pub fn suggested_salary(&self) -> TrackerResult<Option<Money>> {
        Ok(suggested_salary(&self.ledger()?))
    }

    /// The month after the newest entry, or the current month
    pub fn next_month(&self) -> TrackerResult<Month> {
        let ledger = self.ledger()?;
        Ok(ledger
            .first()
            .and_then(|e| e.entry.parsed_month())
            .map(|m| m.succ())
            .unwrap_or_else(Month::current))
    }
}

/// Short-form label for a typed month
fn canonical_label(month: &str) -> TrackerResult<String> {
    if month.trim().is_empty() {
        return Err(TrackerError::Validation("Month cannot be empty".into()));
    }
    Month::parse(month)
        .map(|m| m.short_label())
        .ok_or_else(|| {
            TrackerError::Validation(format!(
                "Month '{}' is not of the form 'Jan 2025'",
                month.trim()
            ))
        })
}

fn ensure_month_free(data: &UserData, month: &str, except: Option<EntryId>) -> TrackerResult<()> {
    let taken = data
        .entries
        .find(|e| Some(e.id) != except && same_month(&e.month, month))
        .is_some();
    if taken {
        return Err(TrackerError::Duplicate {
            entity_type: "Monthly entry",
            identifier: month.to_string(),
        });
    }
    Ok(())
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

    #[test]
    fn test_create_normalizes_month_and_computes_savings() {
        let (_temp, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        let entry = service
            .create("january 2025", Money::from_units(5000), Money::from_units(3200))
            .unwrap();

        assert_eq!(entry.month, "Jan 2025");
        assert_eq!(entry.savings, Money::from_units(1800));
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_duplicate_month_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = EntryService::new(&storage);
        service
            .create("Jan 2025", Money::from_units(1), Money::zero())
            .unwrap();

        let err = service
            .create("January 2025", Money::from_units(2), Money::zero())
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_unreadable_month_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = EntryService::new(&storage);

        assert!(service
            .create("Someday", Money::zero(), Money::zero())
            .unwrap_err()
            .is_validation());
        assert!(service
            .create("  ", Money::zero(), Money::zero())
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_update_and_ledger() {
        let (_temp, storage) = create_test_storage();
        let service = EntryService::new(&storage);
        let jan = service
            .create("Jan 2025", Money::from_units(5000), Money::from_units(4000))
            .unwrap();
        service
            .create("Feb 2025", Money::from_units(5000), Money::from_units(3000))
            .unwrap();

        let updated = service
            .update(
                jan.id,
                EntryPatch {
                    expense: Some(Money::from_units(2000)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.savings, Money::from_units(3000));

        let ledger = service.ledger().unwrap();
        assert_eq!(ledger[0].month(), "Feb 2025");
        assert_eq!(ledger[0].total_savings, Money::from_units(5000));
    }

    #[test]
    fn test_update_to_taken_month_rejected() {
        let (_temp, storage) = create_test_storage();
        let service = EntryService::new(&storage);
        let jan = service.create("Jan 2025", Money::zero(), Money::zero()).unwrap();
        service.create("Feb 2025", Money::zero(), Money::zero()).unwrap();

        let err = service
            .update(
                jan.id,
                EntryPatch {
                    month: Some("Feb 2025".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_duplicate());

        // Keeping its own month is fine
        service
            .update(
                jan.id,
                EntryPatch {
                    month: Some("January 2025".into()),
                    ..Default::default()
                },
            )
            .unwrap();
    }

    #[test]
    fn test_find_and_delete() {
        let (_temp, storage) = create_test_storage();
        let service = EntryService::new(&storage);
        let entry = service.create("Mar 2025", Money::zero(), Money::zero()).unwrap();

        assert_eq!(service.find("March 2025").unwrap().unwrap().id, entry.id);
        assert_eq!(
            service.find(&entry.id.to_string()).unwrap().unwrap().id,
            entry.id
        );

        service.delete(entry.id).unwrap();
        assert!(service.get(entry.id).unwrap().is_none());
        assert!(service.delete(entry.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_suggestions() {
        let (_temp, storage) = create_test_storage();
        let service = EntryService::new(&storage);
        assert_eq!(service.suggested_salary().unwrap(), None);

        service
            .create("Dec 2024", Money::from_units(7000), Money::zero())
            .unwrap();
        assert_eq!(
            service.suggested_salary().unwrap(),
            Some(Money::from_units(7000))
        );
        assert_eq!(service.next_month().unwrap().short_label(), "Jan 2025");
    }

    #[test]
    fn test_writes_are_audited() {
        let (_temp, storage) = create_test_storage();
        let service = EntryService::new(&storage);
        let entry = service.create("Jan 2025", Money::zero(), Money::zero()).unwrap();
        service.delete(entry.id).unwrap();

        let log = storage.audit().read_all().unwrap();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].entity_name.as_deref(), Some("Jan 2025"));
    }
}
