use url::Url;

use crate::paths::encode_relative_path;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("invalid source url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("unsupported source scheme {0}")]
    UnsupportedScheme(String),
}

/// A remote directory being scanned: the root prefix plus the sub-path
/// reached during recursion.
///
/// `sub_path` keeps the percent-encoded form the directory was linked with
/// and is either empty (the root) or `/`-terminated; `directory` is the
/// matching URL that requests are sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    base: Url,
    directory: Url,
    sub_path: String,
}

impl SourceLocation {
    /// Parses an absolute http(s) prefix, normalizing it to end with `/`.
    pub fn parse(prefix: &str) -> Result<Self, SourceError> {
        let trimmed = prefix.trim();
        let mut base = Url::parse(trimmed).map_err(|err| SourceError::InvalidUrl {
            url: trimmed.to_string(),
            message: err.to_string(),
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(SourceError::UnsupportedScheme(base.scheme().to_string()));
        }
        base.set_query(None);
        base.set_fragment(None);
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            directory: base.clone(),
            base,
            sub_path: String::new(),
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn directory_url(&self) -> &Url {
        &self.directory
    }

    /// URL of a file named `name` (unencoded) inside this directory.
    pub fn sibling_url(&self, name: &str) -> Option<Url> {
        self.directory.join(&encode_relative_path(name)).ok()
    }

    /// Root-relative entry path for `name` found in this directory.
    pub fn entry_path(&self, name: &str) -> String {
        format!("{}{}", self.sub_path, name.trim_start_matches('/'))
    }

    /// Location of a subdirectory. `encoded` is the directory's path relative
    /// to this one as it appears on the wire and must end with `/`.
    pub fn child(&self, encoded: &str) -> Option<Self> {
        if !encoded.ends_with('/') {
            return None;
        }
        let directory = self.directory.join(encoded).ok()?;
        Some(Self {
            base: self.base.clone(),
            directory,
            sub_path: self.entry_path(encoded),
        })
    }

    /// Encoded path of `url` relative to this directory, if `url` lies
    /// strictly below it on the same origin.
    pub fn relative_to_directory(&self, url: &Url) -> Option<String> {
        if url.origin() != self.directory.origin() {
            return None;
        }
        let rest = url.path().strip_prefix(self.directory.path())?;
        if rest.is_empty() {
            return None;
        }
        Some(rest.to_string())
    }

    /// URL of a root-relative entry produced by discovery.
    pub fn file_url(&self, entry: &str) -> Result<Url, SourceError> {
        self.base
            .join(&encode_relative_path(entry.trim_start_matches('/')))
            .map_err(|err| SourceError::InvalidUrl {
                url: entry.to_string(),
                message: err.to_string(),
            })
    }
}
