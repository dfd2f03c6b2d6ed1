//! Monthly savings entry model
//!
//! One record per month holding salary, expense and the resulting savings.
//! The ledger accumulates `savings` as stored; it is computed from salary and
//! expense only when an entry is written.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::EntryId;
use super::money::{deserialize_lenient, Money};
use super::month::Month;

/// A monthly salary/expense/savings record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyEntry {
    /// Unique identifier
    pub id: EntryId,

    /// Month label, e.g. "Jan 2025"
    pub month: String,

    /// Salary received that month
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub salary: Money,

    /// Total spending that month
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub expense: Money,

    /// Amount saved that month (conventionally salary - expense)
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub savings: Money,

    /// When the entry was created
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl MonthlyEntry {
    /// Create an entry whose savings are salary minus expense
    pub fn new(month: impl Into<String>, salary: Money, expense: Money) -> Self {
        Self::with_savings(month, salary, expense, salary - expense)
    }

    /// Create an entry with explicitly supplied savings
    pub fn with_savings(
        month: impl Into<String>,
        salary: Money,
        expense: Money,
        savings: Money,
    ) -> Self {
        Self {
            id: EntryId::new(),
            month: month.into(),
            salary,
            expense,
            savings,
            created_at: Utc::now(),
        }
    }

    /// The parsed month, if the label is readable
    pub fn parsed_month(&self) -> Option<Month> {
        Month::parse(&self.month)
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.month.trim().is_empty() {
            return Err(EntryValidationError::EmptyMonth);
        }
        if self.parsed_month().is_none() {
            return Err(EntryValidationError::UnreadableMonth(self.month.clone()));
        }
        Ok(())
    }
}

impl fmt::Display for MonthlyEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: saved {}", self.month, self.savings)
    }
}

/// Partial update for a monthly entry
#[derive(Debug, Clone, Default)]
pub struct EntryPatch {
    pub month: Option<String>,
    pub salary: Option<Money>,
    pub expense: Option<Money>,
}

impl EntryPatch {
    pub fn is_empty(&self) -> bool {
        self.month.is_none() && self.salary.is_none() && self.expense.is_none()
    }

    /// Merge the patch into `entry`, recomputing savings when salary or expense change
    pub fn apply(&self, entry: &mut MonthlyEntry) {
        if let Some(month) = &self.month {
            entry.month = month.clone();
        }
        if self.salary.is_some() || self.expense.is_some() {
            if let Some(salary) = self.salary {
                entry.salary = salary;
            }
            if let Some(expense) = self.expense {
                entry.expense = expense;
            }
            entry.savings = entry.salary - entry.expense;
        }
    }
}

/// Validation errors for monthly entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyMonth,
    UnreadableMonth(String),
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMonth => write!(f, "Month cannot be empty"),
            Self::UnreadableMonth(label) => {
                write!(f, "Month '{}' is not of the form 'Jan 2025'", label)
            }
        }
    }
}

impl std::error::Error for EntryValidationError {}
