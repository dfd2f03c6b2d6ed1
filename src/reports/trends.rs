//! Month-by-month trend series

use serde::Serialize;

use crate::models::{month_key, Money, MonthlyEntry};

use super::ledger::LedgerEntry;

/// Width of the longest bar in the terminal chart
const BAR_WIDTH: usize = 30;

/// One month of the series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub name: String,
    pub salary: Money,
    pub expense: Money,
    pub savings: Money,
}

/// Oldest to newest salary/expense/savings points
pub fn trend_series(entries: &[MonthlyEntry]) -> Vec<TrendPoint> {
    let mut sorted: Vec<&MonthlyEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| month_key(&e.month));
    sorted
        .into_iter()
        .map(|e| TrendPoint {
            name: e.month.clone(),
            salary: e.salary,
            expense: e.expense,
            savings: e.savings,
        })
        .collect()
}

/// Salary of the newest entry, used to prefill the next one
pub fn suggested_salary(ledger: &[LedgerEntry]) -> Option<Money> {
    ledger.first().map(|e| e.entry.salary)
}

/// Render the series as a table with a savings bar per month
pub fn format_terminal(points: &[TrendPoint], symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{:<16} {:>14} {:>14} {:>14}  {}\n",
        "Month", "Salary", "Expense", "Savings", ""
    ));
    output.push_str(&"-".repeat(62 + BAR_WIDTH));
    output.push('\n');

    let widest = points
        .iter()
        .map(|p| p.savings.cents().unsigned_abs())
        .max()
        .unwrap_or(0);

    for point in points {
        let length = if widest == 0 {
            0
        } else {
            (point.savings.cents().unsigned_abs() as f64 / widest as f64 * BAR_WIDTH as f64).round()
                as usize
        };
        let glyph = if point.savings.is_negative() { "-" } else { "#" };
        output.push_str(&format!(
            "{:<16} {:>14} {:>14} {:>14}  {}\n",
            point.name,
            point.salary.format_with_symbol(symbol),
            point.expense.format_with_symbol(symbol),
            point.savings.format_with_symbol(symbol),
            glyph.repeat(length)
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::ledger::build_ledger;

    fn entries() -> Vec<MonthlyEntry> {
        vec![
            MonthlyEntry::new("Mar 2025", Money::from_units(6000), Money::from_units(2000)),
            MonthlyEntry::new("Jan 2025", Money::from_units(5000), Money::from_units(5500)),
            MonthlyEntry::new("Feb 2025", Money::from_units(5000), Money::from_units(3000)),
        ]
    }

    #[test]
    fn test_series_is_chronological() {
        let series = trend_series(&entries());
        let names: Vec<_> = series.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Jan 2025", "Feb 2025", "Mar 2025"]);
        assert_eq!(series[0].savings, Money::from_units(-500));
    }

    #[test]
    fn test_suggested_salary_from_newest() {
        let ledger = build_ledger(&entries(), Money::zero());
        assert_eq!(suggested_salary(&ledger), Some(Money::from_units(6000)));
        assert_eq!(suggested_salary(&[]), None);
    }

    #[test]
    fn test_chart_bars() {
        let text = format_terminal(&trend_series(&entries()), "$");
        let march = text.lines().find(|l| l.starts_with("Mar 2025")).unwrap();
        assert!(march.ends_with(&"#".repeat(BAR_WIDTH)));
        let january = text.lines().find(|l| l.starts_with("Jan 2025")).unwrap();
        assert!(january.contains("-$500.00"));
        assert!(january.trim_end().ends_with('-'));
    }
}
