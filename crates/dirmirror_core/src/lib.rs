//! Dirmirror core: IO-free data model for discovery and mirroring, plus the
//! pure session state machine that turns engine progress into user-visible
//! status.
mod cap;
mod context;
mod effect;
mod msg;
mod outcome;
mod paths;
mod source;
mod state;
mod update;
mod view_model;

pub use cap::CapTracker;
pub use context::CrawlContext;
pub use effect::Effect;
pub use msg::Msg;
pub use outcome::{DiscoveryError, MirrorResult, SkippedEntry};
pub use paths::{dedupe_entries, encode_relative_path, normalize_entry};
pub use source::{SourceError, SourceLocation};
pub use state::{AppState, FailureReason, Notification, Phase};
pub use update::update;
pub use view_model::AppViewModel;
