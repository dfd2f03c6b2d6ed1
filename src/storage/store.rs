//! In-memory user document and typed record collections
//!
//! `UserData` is the whole persisted state of one user. Batches operate on a
//! private clone of it, so collection methods mutate freely and the store
//! decides whether the result is committed.

use serde::{Deserialize, Serialize};

use crate::models::{
    CardExpense, CardExpenseId, DailyExpense, DailyExpenseId, DistributionId, DistributionItem,
    EntryId, MonthlyEntry,
};

use super::profile::UserProfile;

/// A stored record with a typed identifier
pub trait Record: Clone {
    type Id: Copy + PartialEq + std::fmt::Display;

    fn id(&self) -> Self::Id;
}

impl Record for MonthlyEntry {
    type Id = EntryId;

    fn id(&self) -> EntryId {
        self.id
    }
}

impl Record for DistributionItem {
    type Id = DistributionId;

    fn id(&self) -> DistributionId {
        self.id
    }
}

impl Record for CardExpense {
    type Id = CardExpenseId;

    fn id(&self) -> CardExpenseId {
        self.id
    }
}

impl Record for DailyExpense {
    type Id = DailyExpenseId;

    fn id(&self) -> DailyExpenseId {
        self.id
    }
}

/// An ordered collection of records of one kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<T> {
    records: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> Collection<T> {
    /// Append a record, returning its id
    pub fn insert(&mut self, record: T) -> T::Id {
        let id = record.id();
        self.records.push(record);
        id
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// First record matching `predicate`
    pub fn find<P>(&self, predicate: P) -> Option<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().find(|r| predicate(r))
    }

    /// All records matching `predicate`, in stored order
    pub fn filter<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Apply `change` to the record with `id`, returning (before, after)
    pub fn update<F>(&mut self, id: T::Id, change: F) -> Option<(T, T)>
    where
        F: FnOnce(&mut T),
    {
        let record = self.records.iter_mut().find(|r| r.id() == id)?;
        let before = record.clone();
        change(record);
        Some((before, record.clone()))
    }

    /// Apply `change` to every record matching `predicate`
    pub fn update_where<P, F>(&mut self, predicate: P, mut change: F) -> Vec<(T, T)>
    where
        P: Fn(&T) -> bool,
        F: FnMut(&mut T),
    {
        let mut changed = Vec::new();
        for record in self.records.iter_mut().filter(|r| predicate(r)) {
            let before = record.clone();
            change(record);
            changed.push((before, record.clone()));
        }
        changed
    }

    /// Remove the record with `id`
    pub fn remove(&mut self, id: T::Id) -> Option<T> {
        let pos = self.records.iter().position(|r| r.id() == id)?;
        Some(self.records.remove(pos))
    }

    /// Remove every record matching `predicate`, returning them
    pub fn remove_where<P>(&mut self, predicate: P) -> Vec<T>
    where
        P: Fn(&T) -> bool,
    {
        let (removed, kept): (Vec<T>, Vec<T>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| predicate(r));
        self.records = kept;
        removed
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(records: Vec<T>) -> Self {
        Self { records }
    }
}

/// Everything stored for one user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub entries: Collection<MonthlyEntry>,

    #[serde(default)]
    pub distributions: Collection<DistributionItem>,

    #[serde(default)]
    pub cc_expenses: Collection<CardExpense>,

    #[serde(default)]
    pub daily_expenses: Collection<DailyExpense>,

    #[serde(default)]
    pub profile: UserProfile,
}

impl UserData {
    /// Total number of records across all collections
    pub fn record_count(&self) -> usize {
        self.entries.len()
            + self.distributions.len()
            + self.cc_expenses.len()
            + self.daily_expenses.len()
    }
}
