//! Core data models for savings-cli
//!
//! This module contains the records the tracker stores (monthly entries,
//! distributions, card charges, daily expenses) together with the value
//! types they are built from: money, month labels and amount expressions.

pub mod card_expense;
pub mod daily_expense;
pub mod distribution;
pub mod entry;
pub mod expression;
pub mod ids;
pub mod money;
pub mod month;

pub use card_expense::{CardExpense, CardExpensePatch};
pub use daily_expense::DailyExpense;
pub use distribution::{DistributionItem, DistributionPatch};
pub use entry::{EntryPatch, MonthlyEntry};
pub use ids::{CardExpenseId, DailyExpenseId, DistributionId, EntryId};
pub use money::Money;
pub use month::{month_key, same_month, Month};
