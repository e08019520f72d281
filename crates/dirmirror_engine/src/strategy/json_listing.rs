use serde_json::Value;

use super::item_path;

const ARRAY_KEYS: &[&str] = &["Name", "name", "path"];
const ENTRIES_KEYS: &[&str] = &["Name"];
const FILES_KEYS: &[&str] = &["path", "name"];

/// Parses a flat JSON directory listing into entry names.
///
/// Accepted shapes: a bare array of names, an object-storage style
/// `{"Entries": [{"Name": ...}]}`, or `{"files": [...]}`. Names ending in
/// `/` are directories and are dropped; this strategy never recurses.
pub fn parse_json_listing(text: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(text).ok()?;
    let (items, keys): (&Vec<Value>, &[&str]) = match &value {
        Value::Array(items) => (items, ARRAY_KEYS),
        Value::Object(fields) => {
            if let Some(entries) = fields.get("Entries").and_then(Value::as_array) {
                (entries, ENTRIES_KEYS)
            } else if let Some(files) = fields.get("files").and_then(Value::as_array) {
                (files, FILES_KEYS)
            } else {
                return None;
            }
        }
        _ => return None,
    };
    Some(
        items
            .iter()
            .filter_map(|item| item_path(item, keys))
            .filter(|name| !name.trim().is_empty() && !name.ends_with('/'))
            .map(str::to_string)
            .collect(),
    )
}
