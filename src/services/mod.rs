//! Service layer for savings-cli
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, computed fields, and multi-record operations. Every
//! write goes through one `Storage::transact` call and is audited after it
//! commits.

pub mod card;
pub mod distribution;
pub mod entry;
pub mod expense;
pub mod profile;

pub use card::CardService;
pub use distribution::{DistributionOverview, DistributionService};
pub use entry::EntryService;
pub use expense::{ExpenseService, MonthBreakdown};
pub use profile::{ProfileService, RepairReport};
