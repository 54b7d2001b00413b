use fintrack_core::constants::collections::HISTORY;
use fintrack_core::history::{HistoryEntry, NewHistoryEntry};
use fintrack_core::records::MalformedRecord;

use crate::document::{Document, Fields, Value};

pub fn history_entry_from_document(document: &Document) -> Result<HistoryEntry, MalformedRecord> {
    let r = document.reader(HISTORY);
    Ok(HistoryEntry {
        id: r.id().to_string(),
        user_id: r.string("userId")?,
        action: r.string("action")?,
        timestamp: r.timestamp("timestamp")?,
    })
}

pub fn history_fields(entry: &NewHistoryEntry) -> Fields {
    Fields::from([
        ("action".to_string(), Value::string(entry.action.as_str())),
        ("timestamp".to_string(), Value::timestamp(entry.timestamp)),
    ])
}
