use dirmirror_core::SourceLocation;
use mirror_logging::mirror_debug;
use serde_json::Value;

use super::item_path;
use crate::decode::decode_text;
use crate::Fetcher;

/// Manifest filenames probed in order.
pub const DEFAULT_MANIFEST_NAMES: [&str; 3] = ["__files.json", "files.json", "_files.json"];

/// Tries each manifest name against `location` and returns the entries of
/// the first one that parses, prefixed with the location's sub-path.
///
/// Fetch and parse failures move on to the next candidate; `None` means no
/// candidate was usable.
pub async fn probe_manifest(
    fetcher: &dyn Fetcher,
    location: &SourceLocation,
    names: &[String],
) -> Option<Vec<String>> {
    for name in names {
        let Some(url) = location.sibling_url(name) else {
            continue;
        };
        let output = match fetcher.fetch(&url).await {
            Ok(output) => output,
            Err(err) => {
                mirror_debug!("manifest {} unavailable: {}", url, err);
                continue;
            }
        };
        let text = match decode_text(&output.bytes, output.metadata.content_type.as_deref()) {
            Ok(decoded) => decoded.text,
            Err(err) => {
                mirror_debug!("manifest {} undecodable: {}", url, err);
                continue;
            }
        };
        match parse_manifest(&text) {
            Some(paths) => {
                mirror_debug!("manifest {} lists {} entries", url, paths.len());
                return Some(
                    paths
                        .iter()
                        .map(|path| location.entry_path(path))
                        .collect(),
                );
            }
            None => mirror_debug!("manifest {} has no recognizable file list", url),
        }
    }
    None
}

/// Accepts a bare list or an object with a `files` list. Items are path
/// strings or objects with a `path` field; anything else is ignored.
pub fn parse_manifest(text: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(text).ok()?;
    let items = match &value {
        Value::Array(items) => items,
        Value::Object(fields) => fields.get("files")?.as_array()?,
        _ => return None,
    };
    Some(
        items
            .iter()
            .filter_map(|item| item_path(item, &["path"]))
            .filter(|path| !path.trim().is_empty())
            .map(str::to_string)
            .collect(),
    )
}
