//! Reports module for savings-cli
//!
//! Pure, synchronous views derived from one store snapshot: the running
//! ledger, distribution reconciliation, card bills, category spending, the
//! dashboard and the trend series.

pub mod card_groups;
pub mod categories;
pub mod ledger;
pub mod reconciliation;
pub mod summary;
pub mod trends;

pub use card_groups::{group_cards, include_cards, order_groups, CardGroup, CardGroupOrder};
pub use categories::{
    aggregate_by_category, expenses_in_category, month_total, share_badge, share_row,
    CategoryStat,
};
pub use ledger::{build_ledger, current_total_savings, LedgerEntry};
pub use reconciliation::{
    reconcile, sort_distributions, BalanceStatus, Reconciliation, SortDirection, SortKey,
};
pub use summary::DashboardSummary;
pub use trends::{suggested_salary, trend_series, TrendPoint};
