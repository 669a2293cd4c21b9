use crate::models::LogEntry;
use chrono::{DateTime, Utc};

/// Builds a new entry for `timestamp` and prepends it.
///
/// The id is the timestamp in epoch milliseconds, bumped past the largest
/// existing id when it would collide or go backwards.
pub fn append(mut entries: Vec<LogEntry>, timestamp: DateTime<Utc>) -> (Vec<LogEntry>, LogEntry) {
    let mut id = timestamp.timestamp_millis();
    if let Some(max_id) = entries.iter().map(|entry| entry.id).max() {
        if id <= max_id {
            id = max_id.saturating_add(1);
        }
    }

    let entry = LogEntry { id, timestamp };
    entries.insert(0, entry.clone());
    (entries, entry)
}

/// Drops the entry with `id`. Unknown ids leave the sequence untouched.
pub fn remove(mut entries: Vec<LogEntry>, id: i64) -> Vec<LogEntry> {
    entries.retain(|entry| entry.id != id);
    entries
}
