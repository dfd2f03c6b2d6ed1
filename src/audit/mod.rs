//! Audit logging for savings-cli
//!
//! Every service write appends create, update or delete entries with the
//! record's before/after JSON to a line-delimited log shared by all users.
//!
//! - `AuditEntry`: one recorded operation, tagged with its user.
//! - `AuditLogger`: appends to and reads the JSONL file.
//! - `generate_diff`: field-level summary used for updates.
//!
//! # Example
//!
//! ```rust,ignore
//! use savings::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(paths.audit_log());
//! let entry = AuditEntry::create(
//!     EntityType::MonthlyEntry,
//!     entry.id.to_string(),
//!     Some(entry.month.clone()),
//!     &entry,
//! )
//! .for_user("default");
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
