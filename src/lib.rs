//! savings-cli - Terminal personal finance tracker
//!
//! This library provides the core functionality for the savings-cli tracker:
//! a month-by-month savings ledger, the reconciliation of where the savings
//! sit, credit-card bills grouped per card and month, and categorized daily
//! expenses.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Stored records and the money, month and expression value types
//! - `storage`: One JSON document per user with atomic batch commits
//! - `audit`: Audit logging system
//! - `reports`: Pure views derived from a snapshot (ledger, reconciliation, card bills, categories)
//! - `services`: Business logic layer
//! - `display`, `cli`: Terminal formatting and command handlers
//! - `export`: CSV, JSON and YAML export
//!
//! # Example
//!
//! ```rust,ignore
//! use savings::config::paths::TrackerPaths;
//! use savings::services::EntryService;
//! use savings::storage::Storage;
//!
//! let storage = Storage::open(TrackerPaths::new()?, "default")?;
//! let ledger = EntryService::new(&storage).ledger()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{TrackerError, TrackerResult};
