//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod balance;
pub mod card;
pub mod dist;
pub mod entry;
pub mod expense;
pub mod export;
pub mod report;

pub use audit::handle_audit_command;
pub use balance::{handle_balance_command, BalanceCommands};
pub use card::{handle_card_command, CardCommands};
pub use dist::{handle_dist_command, DistCommands};
pub use entry::{handle_entry_command, EntryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::{Local, NaiveDate};

use crate::error::{TrackerError, TrackerResult};
use crate::models::{expression, Money, Month};

/// Parse a typed amount such as "1500", "1,500.50", "₹200" or "50000 + 2500"
pub(crate) fn parse_amount(input: &str, field: &str) -> TrackerResult<Money> {
    if let Ok(amount) = Money::parse(input) {
        return Ok(amount);
    }
    expression::try_evaluate(input)
        .filter(|units| units.abs() < (i64::MAX / 100) as f64)
        .map(Money::from_f64)
        .ok_or_else(|| {
            TrackerError::Validation(format!(
                "Invalid {} '{}'. Use an amount like '1500.50' or a sum like '1200 + 300'",
                field, input
            ))
        })
}

/// Resolve an optional `--month` argument, defaulting to the current month
pub(crate) fn resolve_month(input: Option<&str>) -> TrackerResult<Month> {
    match input {
        None => Ok(Month::current()),
        Some(label) => Month::parse(label).ok_or_else(|| {
            TrackerError::Validation(format!(
                "Invalid month '{}'. Use a label like 'Jan 2025' or 'January 2025'",
                label
            ))
        }),
    }
}

/// Parse an optional date in `format`, defaulting to today
pub(crate) fn resolve_date(input: Option<&str>, format: &str) -> TrackerResult<NaiveDate> {
    match input {
        None => Ok(Local::now().date_naive()),
        Some(text) => NaiveDate::parse_from_str(text.trim(), format).map_err(|_| {
            TrackerError::Validation(format!(
                "Invalid date '{}'. Expected format {}",
                text, format
            ))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1500", "salary").unwrap(), Money::from_units(1500));
        assert!(parse_amount("lots", "salary").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount_expression() {
        assert_eq!(
            parse_amount("50000 + 2500", "salary").unwrap(),
            Money::from_units(52500)
        );
        assert_eq!(parse_amount("1500 + 300", "salary").unwrap(), Money::from_units(1800));
        assert_eq!(parse_amount("-200", "expense").unwrap(), Money::from_units(-200));
        assert!(parse_amount("1500 +", "salary").unwrap_err().is_validation());
        assert!(parse_amount("99999999999999999", "salary").unwrap_err().is_validation());
    }

    #[test]
    fn test_resolve_month() {
        assert_eq!(
            resolve_month(Some("march 2025")).unwrap().short_label(),
            "Mar 2025"
        );
        assert_eq!(resolve_month(None).unwrap(), Month::current());
        assert!(resolve_month(Some("soon")).is_err());
    }

    #[test]
    fn test_resolve_date() {
        let date = resolve_date(Some("2025-02-28"), "%Y-%m-%d").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
        assert!(resolve_date(Some("28/02/2025"), "%Y-%m-%d").is_err());
    }
}
