//! Dashboard summary
//!
//! Headline figures computed from the ledger: current savings, savings for
//! a selected year and the monthly averages.

use serde::Serialize;

use crate::models::{Money, Month};

use super::ledger::{current_total_savings, LedgerEntry};

/// Figures shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub current_total_savings: Money,
    /// Year the yearly figure covers; `None` means all entries
    pub year: Option<i32>,
    pub yearly_savings: Money,
    /// Distinct years present, newest first
    pub available_years: Vec<i32>,
    /// Distinct salaries present, highest first
    pub unique_salaries: Vec<Money>,
    /// Salary the averages are restricted to, if any
    pub salary_filter: Option<Money>,
    pub avg_savings: Money,
    pub avg_salary: Money,
    /// Average savings as a whole percentage of average salary
    pub avg_savings_percent: i64,
    /// Average expense over every entry
    pub avg_expense: Money,
    pub entry_count: usize,
}

impl DashboardSummary {
    pub fn compute(
        ledger: &[LedgerEntry],
        initial_balance: Money,
        year_filter: Option<i32>,
        salary_filter: Option<Money>,
    ) -> Self {
        let yearly_savings = ledger
            .iter()
            .filter(|e| year_filter.map_or(true, |y| in_year(e, y)))
            .map(|e| e.entry.savings)
            .sum();

        let mut available_years: Vec<i32> = ledger
            .iter()
            .filter_map(|e| e.entry.parsed_month().map(|m| m.year()))
            .collect();
        available_years.sort_unstable_by(|a, b| b.cmp(a));
        available_years.dedup();

        let mut unique_salaries: Vec<Money> = ledger.iter().map(|e| e.entry.salary).collect();
        unique_salaries.sort_unstable_by(|a, b| b.cmp(a));
        unique_salaries.dedup();

        let salary_matched: Vec<&LedgerEntry> = ledger
            .iter()
            .filter(|e| salary_filter.map_or(true, |s| e.entry.salary == s))
            .collect();
        let avg_savings = average(salary_matched.iter().map(|e| e.entry.savings));
        let avg_salary = average(salary_matched.iter().map(|e| e.entry.salary));
        let avg_savings_percent = if avg_salary.is_zero() {
            0
        } else {
            avg_savings.percent_of(avg_salary).round() as i64
        };

        Self {
            current_total_savings: current_total_savings(ledger, initial_balance),
            year: year_filter,
            yearly_savings,
            available_years,
            unique_salaries,
            salary_filter,
            avg_savings,
            avg_salary,
            avg_savings_percent,
            avg_expense: average(ledger.iter().map(|e| e.entry.expense)),
            entry_count: ledger.len(),
        }
    }

    /// Format for terminal output
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        output.push_str("Savings Dashboard\n");
        output.push_str(&"=".repeat(50));
        output.push('\n');

        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Total savings:",
            self.current_total_savings.format_with_symbol(symbol)
        ));

        let year_label = match self.year {
            Some(year) => format!("Savings in {}:", year),
            None => "Savings (all years):".to_string(),
        };
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            year_label,
            self.yearly_savings.format_with_symbol(symbol)
        ));

        output.push_str(&"-".repeat(50));
        output.push('\n');
        if let Some(salary) = self.salary_filter {
            output.push_str(&format!(
                "Averages for salary {}\n",
                salary.format_with_symbol(symbol)
            ));
        }
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Average salary:",
            self.avg_salary.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Average savings:",
            format!(
                "{} ({}%)",
                self.avg_savings.format_with_symbol(symbol),
                self.avg_savings_percent
            )
        ));
        output.push_str(&format!(
            "{:<28} {:>20}\n",
            "Average expense:",
            self.avg_expense.format_with_symbol(symbol)
        ));
        output.push_str(&format!("{:<28} {:>20}\n", "Months recorded:", self.entry_count));

        if !self.available_years.is_empty() {
            let years: Vec<String> = self.available_years.iter().map(|y| y.to_string()).collect();
            output.push_str(&format!("\nYears: {}\n", years.join(", ")));
        }

        output
    }
}

fn in_year(entry: &LedgerEntry, year: i32) -> bool {
    match Month::parse(&entry.entry.month) {
        Some(month) => month.year() == year,
        None => entry.entry.month.contains(&year.to_string()),
    }
}

/// Mean rounded to whole cents; zero for no values
fn average<I>(values: I) -> Money
where
    I: Iterator<Item = Money>,
{
    let (sum, count) = values.fold((0i64, 0i64), |(s, n), m| (s + m.cents(), n + 1));
    if count == 0 {
        Money::zero()
    } else {
        Money::from_cents((sum as f64 / count as f64).round() as i64)
    }
}
