//! Audit log CLI command

use crate::display::format_audit_list;
use crate::error::TrackerResult;
use crate::storage::Storage;

/// Print the most recent audit entries for the current user, or for everyone
pub fn handle_audit_command(storage: &Storage, limit: usize, all_users: bool) -> TrackerResult<()> {
    let user = (!all_users).then(|| storage.user());
    let entries = storage.audit().read_recent(limit, user)?;
    println!("{}", format_audit_list(&entries));
    Ok(())
}
