//! Audit log display

use crate::audit::AuditEntry;

/// Format audit entries, one block per entry
pub fn format_audit_list(entries: &[AuditEntry]) -> String {
    if entries.is_empty() {
        return "No audit entries found.".to_string();
    }

    entries
        .iter()
        .map(AuditEntry::format_human_readable)
        .collect::<Vec<_>>()
        .join("\n")
}
