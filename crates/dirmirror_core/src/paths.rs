use std::collections::HashSet;

/// Percent-decodes `raw`, leaving it untouched when the result is not UTF-8.
pub fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Percent-encodes each `/`-separated segment of a relative path.
pub fn encode_relative_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Normalizes one discovered entry into a root-relative file path.
///
/// Entries arrive percent-encoded or plain and are decoded exactly once here.
/// Returns `None` for entries that are empty, name a directory, or contain a
/// `.` or `..` segment.
pub fn normalize_entry(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_start_matches('/');
    let decoded = decode_component(trimmed);
    let relative = decoded.trim_start_matches('/');
    if relative.is_empty() || relative.ends_with('/') {
        return None;
    }
    if relative.split('/').any(|segment| matches!(segment, "." | "..")) {
        return None;
    }
    Some(relative.to_string())
}

/// Normalizes entries and removes duplicates, keeping first-seen order.
pub fn dedupe_entries<I, S>(entries: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter_map(|entry| normalize_entry(entry.as_ref()))
        .filter(|entry| seen.insert(entry.clone()))
        .collect()
}
