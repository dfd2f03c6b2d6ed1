//! Storage layer for savings-cli
//!
//! Each user owns one JSON document. Writers go through [`Storage::transact`],
//! which stages changes on a clone, persists it atomically and only then swaps
//! it in, so readers see either the old or the new document.

pub mod file_io;
pub mod profile;
pub mod store;

pub use file_io::{read_json, write_json_atomic, FileState};
pub use profile::{add_to_set, remove_from_set, replace_in_set, UserProfile};
pub use store::{Collection, Record, UserData};

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, RwLock};

use serde::Serialize;
use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::TrackerPaths;
use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};

/// A user's record store
pub struct Storage {
    paths: TrackerPaths,
    user: String,
    path: PathBuf,
    data: RwLock<Arc<UserData>>,
    subscribers: Mutex<Vec<Sender<Arc<UserData>>>>,
    audit: AuditLogger,
}

impl Storage {
    /// Open the store for `user`, seeding a new profile from settings
    pub fn open(paths: TrackerPaths, user: &str) -> TrackerResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        Self::open_with_settings(paths, user, &settings)
    }

    pub fn open_with_settings(
        paths: TrackerPaths,
        user: &str,
        settings: &Settings,
    ) -> TrackerResult<Self> {
        paths.ensure_directories()?;

        let path = paths.user_store_file(user);
        let data = if path.exists() {
            read_json::<UserData, _>(&path)?
        } else {
            UserData {
                profile: UserProfile::seeded(&settings.default_categories),
                ..UserData::default()
            }
        };

        debug!(user, path = %path.display(), records = data.record_count(), "opened store");

        Ok(Self {
            audit: AuditLogger::new(paths.audit_log()),
            paths,
            user: user.to_string(),
            path,
            data: RwLock::new(Arc::new(data)),
            subscribers: Mutex::new(Vec::new()),
        })
    }

    pub fn paths(&self) -> &TrackerPaths {
        &self.paths
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Path of this user's document
    pub fn file(&self) -> &Path {
        &self.path
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// A consistent view of every collection
    pub fn snapshot(&self) -> TrackerResult<Arc<UserData>> {
        let guard = self
            .data
            .read()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(Arc::clone(&guard))
    }

    /// Run `apply` as one all-or-nothing batch
    ///
    /// The closure works on a private copy. If it returns an error, or the
    /// copy cannot be persisted, the store is left exactly as it was.
    pub fn transact<F, R>(&self, apply: F) -> TrackerResult<R>
    where
        F: FnOnce(&mut UserData) -> TrackerResult<R>,
    {
        let mut guard = self
            .data
            .write()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let mut staged = UserData::clone(&guard);
        let result = apply(&mut staged)?;

        write_json_atomic(&self.path, &staged)?;

        let snapshot = Arc::new(staged);
        *guard = Arc::clone(&snapshot);
        drop(guard);

        debug!(user = %self.user, records = snapshot.record_count(), "committed batch");
        self.broadcast(snapshot);
        Ok(result)
    }

    /// Receive a full snapshot after every commit
    pub fn subscribe(&self) -> TrackerResult<Receiver<Arc<UserData>>> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .map_err(|e| TrackerError::Storage(format!("Failed to acquire subscriber lock: {}", e)))?
            .push(tx);
        Ok(rx)
    }

    fn broadcast(&self, snapshot: Arc<UserData>) {
        if let Ok(mut subscribers) = self.subscribers.lock() {
            subscribers.retain(|tx| tx.send(Arc::clone(&snapshot)).is_ok());
        }
    }

    // === Audit helpers ===

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        record: &T,
    ) {
        self.log(AuditEntry::create(entity_type, entity_id, entity_name, record))
    }

    /// Log an update; unchanged records are not logged
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        let entry = AuditEntry::update(entity_type, entity_id, entity_name, before, after);
        if entry.is_noop() {
            return;
        }
        self.log(entry)
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        record: &T,
    ) {
        self.log(AuditEntry::delete(entity_type, entity_id, entity_name, record))
    }

    /// Log the entries of one batch together
    pub fn log_batch(&self, entries: Vec<AuditEntry>) {
        let entries: Vec<_> = entries
            .into_iter()
            .filter(|e| !e.is_noop())
            .map(|e| e.for_user(&self.user))
            .collect();
        self.record(self.audit.log_batch(&entries));
    }

    fn log(&self, entry: AuditEntry) {
        self.record(self.audit.log(&entry.for_user(&self.user)));
    }

    // Runs after the commit; failures are reported, not returned
    fn record(&self, result: TrackerResult<()>) {
        if let Err(e) = result {
            warn!(user = %self.user, error = %e, "failed to append to audit log");
        }
    }
}

/// Names of users that have a store under `paths`
pub fn list_users(paths: &TrackerPaths) -> TrackerResult<Vec<String>> {
    let dir = paths.users_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut users = Vec::new();
    for entry in std::fs::read_dir(&dir)
        .map_err(|e| TrackerError::Io(format!("Failed to list {}: {}", dir.display(), e)))?
    {
        let entry = entry.map_err(|e| TrackerError::Io(e.to_string()))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                users.push(stem.to_string());
            }
        }
    }
    users.sort();
    Ok(users)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DistributionItem, Money, MonthlyEntry};
    use tempfile::TempDir;

    fn open(temp_dir: &TempDir, user: &str) -> Storage {
        let paths = TrackerPaths::with_base_dir(temp_dir.path().to_path_buf());
        Storage::open(paths, user).unwrap()
    }

    #[test]
    fn test_new_store_is_seeded_but_not_written() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open(&temp_dir, "alice");

        let snapshot = storage.snapshot().unwrap();
        assert_eq!(snapshot.profile.categories.len(), 4);
        assert_eq!(snapshot.record_count(), 0);
        assert!(!storage.file().exists());
    }

    #[test]
    fn test_commit_persists_and_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open(&temp_dir, "alice");

        storage
            .transact(|data| {
                data.entries.insert(MonthlyEntry::new(
                    "Jan 2025",
                    Money::from_units(100),
                    Money::from_units(40),
                ));
                Ok(())
            })
            .unwrap();

        let reopened = open(&temp_dir, "alice");
        let snapshot = reopened.snapshot().unwrap();
        assert_eq!(snapshot.entries.len(), 1);
        assert_eq!(snapshot.entries.as_slice()[0].savings, Money::from_units(60));
        assert_eq!(list_users(reopened.paths()).unwrap(), vec!["alice".to_string()]);
    }

    #[test]
    fn test_failed_batch_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open(&temp_dir, "alice");
        storage
            .transact(|data| {
                data.distributions
                    .insert(DistributionItem::new("Gold", Money::from_units(5)));
                Ok(())
            })
            .unwrap();
        let on_disk_before = std::fs::read_to_string(storage.file()).unwrap();

        let result: TrackerResult<()> = storage.transact(|data| {
            data.distributions
                .insert(DistributionItem::new("Bonds", Money::from_units(7)));
            data.profile.cards.push("HDFC".into());
            Err(TrackerError::Validation("rejected".into()))
        });

        assert!(result.is_err());
        let snapshot = storage.snapshot().unwrap();
        assert_eq!(snapshot.distributions.len(), 1);
        assert!(snapshot.profile.cards.is_empty());
        assert_eq!(std::fs::read_to_string(storage.file()).unwrap(), on_disk_before);
    }

    #[test]
    fn test_snapshots_are_isolated_from_later_commits() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open(&temp_dir, "alice");
        let before = storage.snapshot().unwrap();

        storage
            .transact(|data| {
                data.profile.initial_balance = Money::from_units(10);
                Ok(())
            })
            .unwrap();

        assert_eq!(before.profile.initial_balance, Money::zero());
        assert_eq!(
            storage.snapshot().unwrap().profile.initial_balance,
            Money::from_units(10)
        );
    }

    #[test]
    fn test_subscribers_receive_commits() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open(&temp_dir, "alice");
        let rx = storage.subscribe().unwrap();
        let dropped = storage.subscribe().unwrap();
        drop(dropped);

        storage
            .transact(|data| {
                add_to_set(&mut data.profile.cards, "HDFC");
                Ok(())
            })
            .unwrap();

        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.profile.cards, vec!["HDFC".to_string()]);
        assert_eq!(storage.subscribers.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_users_are_partitioned() {
        let temp_dir = TempDir::new().unwrap();
        let alice = open(&temp_dir, "alice");
        alice
            .transact(|data| {
                data.profile.initial_balance = Money::from_units(1);
                Ok(())
            })
            .unwrap();

        let bob = open(&temp_dir, "bob");
        assert_eq!(bob.snapshot().unwrap().profile.initial_balance, Money::zero());
    }

    #[test]
    fn test_audit_entries_tagged_with_user() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open(&temp_dir, "carol");
        let item = DistributionItem::new("Gold", Money::from_units(5));
        storage.log_create(EntityType::Distribution, item.id.to_string(), None, &item);
        storage.log_update(EntityType::Distribution, item.id.to_string(), None, &item, &item);

        let entries = storage.audit().read_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].user.as_deref(), Some("carol"));
    }

    #[test]
    fn test_unwritable_audit_log_does_not_fail_commit() {
        let temp_dir = TempDir::new().unwrap();
        let storage = open(&temp_dir, "dave");
        std::fs::create_dir_all(storage.paths().audit_log()).unwrap();

        let item = storage
            .transact(|data| {
                let item = DistributionItem::new("Gold", Money::from_units(5));
                data.distributions.insert(item.clone());
                Ok(item)
            })
            .unwrap();
        storage.log_create(EntityType::Distribution, item.id.to_string(), None, &item);

        assert_eq!(storage.snapshot().unwrap().distributions.len(), 1);
    }
}
