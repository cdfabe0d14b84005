use crate::model::{EntryKey, ScheduleEntry};
use std::collections::HashSet;

/// Sort entries by week, day and period. Stable, so duplicates keep their
/// source order.
pub fn sort_canonical(entries: &mut [ScheduleEntry]) {
    entries.sort_by_key(|e| e.key());
}

/// Keep the first entry for each (week, day, period) key and drop the rest.
///
/// Never applied by the ingest paths. Callers opt in after showing the
/// duplicate issues from [`crate::validate::validate`].
pub fn dedupe(entries: Vec<ScheduleEntry>) -> Vec<ScheduleEntry> {
    let mut seen: HashSet<EntryKey> = HashSet::new();
    entries
        .into_iter()
        .filter(|e| {
            let fresh = seen.insert(e.key());
            if !fresh {
                tracing::debug!(key = %e.key(), subject = %e.subject, "dropping duplicate entry");
            }
            fresh
        })
        .collect()
}
