//! Daily expense model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expression;
use super::ids::DailyExpenseId;
use super::money::{deserialize_lenient, Money};
use super::month::Month;

/// A categorized day-to-day expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyExpense {
    pub id: DailyExpenseId,

    pub category: String,

    /// Month label derived from `date`, e.g. "March 2025"
    pub month: String,

    pub date: NaiveDate,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub amount: Money,

    #[serde(default)]
    pub expression: String,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl DailyExpense {
    /// Create an expense; the month label is the full name of the date's month
    pub fn new(
        category: impl Into<String>,
        date: NaiveDate,
        description: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        let expression = expression.into();
        Self {
            id: DailyExpenseId::new(),
            category: category.into(),
            month: Month::from_date(date).full_label(),
            date,
            description: description.into(),
            amount: expression::evaluate_money(&expression),
            expression,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), DailyExpenseValidationError> {
        if self.category.trim().is_empty() {
            return Err(DailyExpenseValidationError::EmptyCategory);
        }
        Ok(())
    }
}

impl fmt::Display for DailyExpense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.category, self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyExpenseValidationError {
    EmptyCategory,
}

impl fmt::Display for DailyExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
        }
    }
}

impl std::error::Error for DailyExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_derived_from_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let expense = DailyExpense::new("Food + Grocery", date, "Vegetables", "120+80");
        assert_eq!(expense.month, "March 2025");
        assert_eq!(expense.amount, Money::from_units(200));
        assert!(expense.validate().is_ok());
    }

    #[test]
    fn test_empty_category() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let expense = DailyExpense::new("", date, "", "1");
        assert_eq!(
            expense.validate(),
            Err(DailyExpenseValidationError::EmptyCategory)
        );
    }
}
