//! Discovery strategies tried against each directory: a well-known manifest,
//! then an HTML autoindex page or a JSON listing depending on the directory
//! response.
mod html_listing;
mod json_listing;
mod manifest;

use serde_json::Value;

pub use html_listing::{extract_link_targets, resolve_targets, ListingTarget};
pub use json_listing::parse_json_listing;
pub use manifest::{parse_manifest, probe_manifest, DEFAULT_MANIFEST_NAMES};

/// What one directory visit produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// A manifest was found; it is authoritative for the whole subtree.
    Manifest(Vec<String>),
    /// A recognized HTML or JSON listing was read.
    Listing(Vec<String>),
    /// Nothing usable was found here.
    Empty,
}

impl Discovery {
    pub fn entries(&self) -> &[String] {
        match self {
            Discovery::Manifest(entries) | Discovery::Listing(entries) => entries,
            Discovery::Empty => &[],
        }
    }

    pub fn into_entries(self) -> Vec<String> {
        match self {
            Discovery::Manifest(entries) | Discovery::Listing(entries) => entries,
            Discovery::Empty => Vec::new(),
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Discovery::Empty)
    }
}

/// Reads a path out of a listing item: either a bare string or an object
/// carrying one of `keys` as a string field.
pub(crate) fn item_path<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a str> {
    match item {
        Value::String(path) => Some(path.as_str()),
        Value::Object(fields) => keys
            .iter()
            .find_map(|key| fields.get(*key).and_then(Value::as_str)),
        _ => None,
    }
}
