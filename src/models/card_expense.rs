//! Credit-card charge model
//!
//! Charges are grouped per card and month. The `amount` is always the
//! evaluated value of `expression`, which keeps what the user typed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expression;
use super::ids::CardExpenseId;
use super::money::{deserialize_lenient, Money};

/// A single charge on a credit-card bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardExpense {
    pub id: CardExpenseId,

    /// Card the charge was made on
    pub card_name: String,

    /// Billing month label, e.g. "January 2025"
    pub month: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub amount: Money,

    /// The arithmetic the amount was typed as
    #[serde(default)]
    pub expression: String,

    /// Whether the charge has been paid off
    #[serde(default)]
    pub is_checked: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl CardExpense {
    /// Create a charge, evaluating `expression` into the amount
    pub fn new(
        card_name: impl Into<String>,
        month: impl Into<String>,
        description: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        let expression = expression.into();
        Self {
            id: CardExpenseId::new(),
            card_name: card_name.into(),
            month: month.into(),
            description: description.into(),
            amount: expression::evaluate_money(&expression),
            expression,
            is_checked: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Latest modification time
    pub fn last_activity(&self) -> DateTime<Utc> {
        self.updated_at.unwrap_or(self.created_at)
    }

    /// Mark the record as modified now
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Flip the paid flag
    pub fn toggle(&mut self) {
        self.is_checked = !self.is_checked;
        self.touch();
    }

    pub fn validate(&self) -> Result<(), CardExpenseValidationError> {
        if self.card_name.trim().is_empty() {
            return Err(CardExpenseValidationError::EmptyCardName);
        }
        if self.month.trim().is_empty() {
            return Err(CardExpenseValidationError::EmptyMonth);
        }
        Ok(())
    }
}

impl fmt::Display for CardExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.is_checked { "x" } else { " " };
        write!(f, "[{}] {} {}", mark, self.description, self.amount)
    }
}

/// Partial update for a card charge
#[derive(Debug, Clone, Default)]
pub struct CardExpensePatch {
    pub description: Option<String>,
    pub expression: Option<String>,
    pub is_checked: Option<bool>,
}

impl CardExpensePatch {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.expression.is_none() && self.is_checked.is_none()
    }

    /// Merge into `expense`, re-evaluating the amount when the expression changes
    pub fn apply(&self, expense: &mut CardExpense) {
        if let Some(description) = &self.description {
            expense.description = description.clone();
        }
        if let Some(text) = &self.expression {
            expense.amount = expression::evaluate_money(text);
            expense.expression = text.clone();
        }
        if let Some(flag) = self.is_checked {
            expense.is_checked = flag;
        }
        expense.touch();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardExpenseValidationError {
    EmptyCardName,
    EmptyMonth,
}

impl fmt::Display for CardExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCardName => write!(f, "Card name cannot be empty"),
            Self::EmptyMonth => write!(f, "Billing month cannot be empty"),
        }
    }
}

impl std::error::Error for CardExpenseValidationError {}
