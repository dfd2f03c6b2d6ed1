//! Distribution item model
//!
//! A distribution is a named slice of the running savings total, for example
//! "Mutual funds" or "Salary account". At most one item is flagged as the
//! salary account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::DistributionId;
use super::money::{deserialize_lenient, Money};

/// Where part of the savings total is held
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionItem {
    pub id: DistributionId,

    /// Display name
    pub name: String,

    /// Amount held there
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub amount: Money,

    /// Whether this item is the account salary lands in
    #[serde(default)]
    pub is_salary_account: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl DistributionItem {
    pub fn new(name: impl Into<String>, amount: Money) -> Self {
        Self {
            id: DistributionId::new(),
            name: name.into(),
            amount,
            is_salary_account: false,
            created_at: Utc::now(),
        }
    }

    /// Builder-style salary flag
    pub fn salary_account(mut self, flag: bool) -> Self {
        self.is_salary_account = flag;
        self
    }

    pub fn validate(&self) -> Result<(), DistributionValidationError> {
        if self.name.trim().is_empty() {
            return Err(DistributionValidationError::EmptyName);
        }
        Ok(())
    }
}

impl fmt::Display for DistributionItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.is_salary_account {
            write!(f, " (salary)")?;
        }
        Ok(())
    }
}

/// Partial update for a distribution item
#[derive(Debug, Clone, Default)]
pub struct DistributionPatch {
    pub name: Option<String>,
    pub amount: Option<Money>,
    pub is_salary_account: Option<bool>,
}

impl DistributionPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.amount.is_none() && self.is_salary_account.is_none()
    }

    pub fn apply(&self, item: &mut DistributionItem) {
        if let Some(name) = &self.name {
            item.name = name.trim().to_string();
        }
        if let Some(amount) = self.amount {
            item.amount = amount;
        }
        if let Some(flag) = self.is_salary_account {
            item.is_salary_account = flag;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionValidationError {
    EmptyName,
}

impl fmt::Display for DistributionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Distribution name cannot be empty"),
        }
    }
}

impl std::error::Error for DistributionValidationError {}
