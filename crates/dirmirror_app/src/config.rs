use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use dirmirror_engine::strategy::DEFAULT_MANIFEST_NAMES;
use dirmirror_engine::{CrawlSettings, EngineConfig, FetchSettings};
use serde::{Deserialize, Serialize};

use crate::cli::Cli;
use crate::logging::LogDestination;

/// Settings read from the optional RON config file. Missing fields take
/// their defaults; CLI flags override file values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub max_depth: usize,
    pub max_entries: usize,
    pub manifest_names: Vec<String>,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub storage_root: PathBuf,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        let fetch = FetchSettings::default();
        let crawl = CrawlSettings::default();
        Self {
            max_depth: crawl.max_depth,
            max_entries: crawl.max_entries,
            manifest_names: DEFAULT_MANIFEST_NAMES.iter().map(|s| s.to_string()).collect(),
            connect_timeout_ms: fetch.connect_timeout.as_millis() as u64,
            request_timeout_ms: fetch.request_timeout.as_millis() as u64,
            redirect_limit: fetch.redirect_limit,
            max_bytes: fetch.max_bytes,
            storage_root: PathBuf::from("./mirror"),
            log_destination: LogDestination::default(),
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        ron::from_str(&content).with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn apply_overrides(&mut self, cli: &Cli) {
        if let Some(max_depth) = cli.max_depth {
            self.max_depth = max_depth;
        }
        if let Some(max_entries) = cli.max_entries {
            self.max_entries = usize::try_from(max_entries).unwrap_or(usize::MAX);
        }
        if let Some(root) = &cli.storage_root {
            self.storage_root = root.clone();
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            redirect_limit: self.redirect_limit,
            max_bytes: self.max_bytes,
        }
    }

    pub fn crawl_settings(&self) -> CrawlSettings {
        CrawlSettings {
            max_depth: self.max_depth,
            max_entries: self.max_entries,
            manifest_names: self.manifest_names.clone(),
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            fetch: self.fetch_settings(),
            crawl: self.crawl_settings(),
            storage_root: self.storage_root.clone(),
        }
    }
}
