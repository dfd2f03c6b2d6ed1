//! Distribution display formatting

use tabled::Tabled;

use super::format::render_table;
use crate::reports::BalanceStatus;
use crate::services::DistributionOverview;

#[derive(Tabled)]
struct DistributionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Salary")]
    salary: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format the distribution items followed by the reconciliation
pub fn format_distribution_overview(overview: &DistributionOverview, symbol: &str) -> String {
    let recon = &overview.reconciliation;
    let mut output = String::new();

    if overview.items.is_empty() {
        output.push_str("No distributions found.\n");
    } else {
        let rows = overview
            .items
            .iter()
            .map(|item| DistributionRow {
                id: item.id.to_string(),
                name: item.name.clone(),
                salary: if item.is_salary_account { "*" } else { "" },
                amount: item.amount.format_with_symbol(symbol),
            })
            .collect();
        output.push_str(&render_table(rows, 3));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format!(
        "{:<20} {:>16}\n",
        "Total savings:",
        recon.target.format_with_symbol(symbol)
    ));
    output.push_str(&format!(
        "{:<20} {:>16}\n",
        "Distributed:",
        recon.total_distributed.format_with_symbol(symbol)
    ));
    let marker = match recon.status() {
        BalanceStatus::Balanced => "✓",
        BalanceStatus::Unallocated => "!",
        BalanceStatus::OverAllocated => "✗",
    };
    output.push_str(&format!("{} {}\n", marker, recon.summary(symbol)));

    output
}
