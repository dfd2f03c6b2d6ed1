//! Distribution service
//!
//! Maintains the distribution items and reconciles them against the current
//! savings total. Flagging an item as the salary account clears the flag on
//! every other item in the same commit.

use crate::audit::{AuditEntry, EntityType};
use crate::error::{TrackerError, TrackerResult};
use crate::models::{DistributionId, DistributionItem, DistributionPatch, Money};
use crate::reports::{
    build_ledger, current_total_savings, reconcile, sort_distributions, Reconciliation,
    SortDirection, SortKey,
};
use crate::storage::{Storage, UserData};

/// Service for distribution items
pub struct DistributionService<'a> {
    storage: &'a Storage,
}

/// Items and their reconciliation, taken from one snapshot
#[derive(Debug, Clone)]
pub struct DistributionOverview {
    pub items: Vec<DistributionItem>,
    pub reconciliation: Reconciliation,
}

impl<'a> DistributionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn create(
        &self,
        name: &str,
        amount: Money,
        is_salary_account: bool,
    ) -> TrackerResult<DistributionItem> {
        let item = DistributionItem::new(name.trim(), amount).salary_account(is_salary_account);
        item.validate()
            .map_err(|e| TrackerError::Validation(e.to_string()))?;

        let (created, cleared) = self.storage.transact(|data| {
            let cleared = if item.is_salary_account {
                clear_salary_flags(data, None)
            } else {
                Vec::new()
            };
            data.distributions.insert(item.clone());
            Ok((item, cleared))
        })?;

        let mut audit = vec![AuditEntry::create(
            EntityType::Distribution,
            created.id.to_string(),
            Some(created.name.clone()),
            &created,
        )];
        audit.extend(cleared);
        self.storage.log_batch(audit);

        Ok(created)
    }

    pub fn get(&self, id: DistributionId) -> TrackerResult<Option<DistributionItem>> {
        Ok(self.storage.snapshot()?.distributions.get(id).cloned())
    }

    /// Find an item by id prefix or case-insensitive name
    pub fn find(&self, reference: &str) -> TrackerResult<Option<DistributionItem>> {
        let snapshot = self.storage.snapshot()?;
        if let Some(item) = snapshot.distributions.find(|d| d.id.matches(reference)) {
            return Ok(Some(item.clone()));
        }
        let wanted = reference.trim().to_lowercase();
        Ok(snapshot
            .distributions
            .find(|d| d.name.to_lowercase() == wanted)
            .cloned())
    }

    pub fn list(&self, key: SortKey, direction: SortDirection) -> TrackerResult<Vec<DistributionItem>> {
        let mut items = self.storage.snapshot()?.distributions.as_slice().to_vec();
        sort_distributions(&mut items, key, direction);
        Ok(items)
    }

    pub fn update(
        &self,
        id: DistributionId,
        patch: DistributionPatch,
    ) -> TrackerResult<DistributionItem> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(TrackerError::Validation(
                    "Distribution name cannot be empty".into(),
                ));
            }
        }

        let ((before, after), cleared) = self.storage.transact(|data| {
            let changed = data
                .distributions
                .update(id, |item| patch.apply(item))
                .ok_or_else(|| TrackerError::distribution_not_found(id.to_string()))?;
            let cleared = if patch.is_salary_account == Some(true) {
                clear_salary_flags(data, Some(id))
            } else {
                Vec::new()
            };
            Ok((changed, cleared))
        })?;

        let mut audit = vec![AuditEntry::update(
            EntityType::Distribution,
            after.id.to_string(),
            Some(after.name.clone()),
            &before,
            &after,
        )];
        audit.extend(cleared);
        self.storage.log_batch(audit);

        Ok(after)
    }

    pub fn delete(&self, id: DistributionId) -> TrackerResult<DistributionItem> {
        let removed = self.storage.transact(|data| {
            data.distributions
                .remove(id)
                .ok_or_else(|| TrackerError::distribution_not_found(id.to_string()))
        })?;

        self.storage.log_delete(
            EntityType::Distribution,
            removed.id.to_string(),
            Some(removed.name.clone()),
            &removed,
        );

        Ok(removed)
    }

    /// The item flagged as the salary account, if any
    pub fn salary_account(&self) -> TrackerResult<Option<DistributionItem>> {
        Ok(self
            .storage
            .snapshot()?
            .distributions
            .find(|d| d.is_salary_account)
            .cloned())
    }

    /// Reconcile the distributions against the ledger's current total
    ///
    /// Both sides come from the same snapshot.
    pub fn reconcile(&self) -> TrackerResult<Reconciliation> {
        Ok(self.overview(SortKey::default(), SortDirection::default())?.reconciliation)
    }

    /// Sorted items plus their reconciliation
    pub fn overview(&self, key: SortKey, direction: SortDirection) -> TrackerResult<DistributionOverview> {
        let snapshot = self.storage.snapshot()?;
        let initial = snapshot.profile.initial_balance;
        let ledger = build_ledger(snapshot.entries.as_slice(), initial);
        let target = current_total_savings(&ledger, initial);

        let mut items = snapshot.distributions.as_slice().to_vec();
        let reconciliation = reconcile(target, &items);
        sort_distributions(&mut items, key, direction);

        Ok(DistributionOverview {
            items,
            reconciliation,
        })
    }
}

/// Clear the salary flag on every item except `keep`, returning audit entries
fn clear_salary_flags(data: &mut UserData, keep: Option<DistributionId>) -> Vec<AuditEntry> {
    data.distributions
        .update_where(
            |d| d.is_salary_account && Some(d.id) != keep,
            |d| d.is_salary_account = false,
        )
        .into_iter()
        .map(|(before, after)| {
            AuditEntry::update(
                EntityType::Distribution,
                after.id.to_string(),
                Some(after.name.clone()),
                &before,
                &after,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::TrackerPaths;
    use crate::services::EntryService;
    use crate::reports::BalanceStatus;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, "default").unwrap();
        (temp_dir, storage)
    }

    fn salary_flags(storage: &Storage) -> Vec<String> {
        storage
            .snapshot()
            .unwrap()
            .distributions
            .filter(|d| d.is_salary_account)
            .into_iter()
            .map(|d| d.name.clone())
            .collect()
    }

    #[test]
    fn test_single_salary_account() {
        let (_temp, storage) = create_test_storage();
        let service = DistributionService::new(&storage);

        service.create("HDFC", Money::from_units(100), true).unwrap();
        let icici = service.create("ICICI", Money::from_units(100), true).unwrap();
        assert_eq!(salary_flags(&storage), vec!["ICICI"]);

        let sbi = service.create("SBI", Money::from_units(100), false).unwrap();
        assert_eq!(salary_flags(&storage), vec!["ICICI"]);

        service
            .update(
                sbi.id,
                DistributionPatch {
                    is_salary_account: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(salary_flags(&storage), vec!["SBI"]);

        service
            .update(
                icici.id,
                DistributionPatch {
                    is_salary_account: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(salary_flags(&storage), vec!["ICICI"]);
        assert_eq!(service.salary_account().unwrap().unwrap().id, icici.id);
    }

    #[test]
    fn test_reconcile_against_ledger() {
        let (_temp, storage) = create_test_storage();
        let entries = EntryService::new(&storage);
        entries
            .create("Jan 2025", Money::from_units(1500), Money::from_units(500))
            .unwrap();

        let service = DistributionService::new(&storage);
        service.create("Funds", Money::from_units(600), false).unwrap();
        service.create("Bank", Money::from_units(400), true).unwrap();

        let r = service.reconcile().unwrap();
        assert_eq!(r.target, Money::from_units(1000));
        assert!(r.is_balanced);

        service.create("Gold", Money::from_units(100), false).unwrap();
        let r = service.reconcile().unwrap();
        assert_eq!(r.difference, Money::from_units(-100));
        assert_eq!(r.status(), BalanceStatus::OverAllocated);
    }

    #[test]
    fn test_validation_and_not_found() {
        let (_temp, storage) = create_test_storage();
        let service = DistributionService::new(&storage);

        assert!(service.create(" ", Money::zero(), false).unwrap_err().is_validation());
        assert!(service
            .delete(DistributionId::new())
            .unwrap_err()
            .is_not_found());

        let item = service.create("Gold", Money::zero(), false).unwrap();
        let err = service
            .update(
                item.id,
                DistributionPatch {
                    name: Some("".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_find_and_list_order() {
        let (_temp, storage) = create_test_storage();
        let service = DistributionService::new(&storage);
        service.create("Gold", Money::from_units(5), false).unwrap();
        service.create("bonds", Money::from_units(50), false).unwrap();

        assert!(service.find("GOLD").unwrap().is_some());
        let names: Vec<_> = service
            .list(SortKey::Name, SortDirection::Ascending)
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["bonds", "Gold"]);
    }

    #[test]
    fn test_flag_change_audited_together() {
        let (_temp, storage) = create_test_storage();
        let service = DistributionService::new(&storage);
        service.create("HDFC", Money::zero(), true).unwrap();
        service.create("ICICI", Money::zero(), true).unwrap();

        // create HDFC, create ICICI + clear HDFC
        let log = storage.audit().read_all().unwrap();
        assert_eq!(log.len(), 3);
        assert_eq!(log[2].entity_name.as_deref(), Some("HDFC"));
        assert_eq!(
            log[2].diff_summary.as_deref(),
            Some("is_salary_account: true -> false")
        );
    }

    #[test]
    fn test_create_succeeds_when_audit_log_unwritable() {
        let (_temp, storage) = create_test_storage();
        std::fs::create_dir_all(storage.paths().audit_log()).unwrap();
        let service = DistributionService::new(&storage);

        let item = service.create("Gold", Money::from_units(5), false).unwrap();

        let items = service
            .list(SortKey::default(), SortDirection::default())
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, item.id);
    }
}
