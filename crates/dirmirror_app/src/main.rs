mod cli;
mod config;
mod logging;
mod report;
mod runner;

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use dirmirror_core::{update, AppState, Msg, Phase, SourceLocation};
use dirmirror_engine::{
    Crawler, EngineHandle, EntryKind, LocalStorage, NullProgressSink, ReqwestFetcher,
    StorageAdapter,
};
use mirror_logging::{level_for_verbosity, mirror_info};

use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::runner::EffectRunner;

const TICK: Duration = Duration::from_millis(75);

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply_overrides(&cli);
    logging::initialize(config.log_destination, level_for_verbosity(cli.verbose));
    mirror_info!("dirmirror {} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Mirror {
            source,
            target,
            deadline,
        } => run_mirror(&config, source, target, deadline.map(Duration::from_secs)),
        Command::Discover { source } => run_discover(&config, &source),
        Command::Ls { path } => run_ls(&config.storage_root, &path),
    }
}

/// Drives one mirror run through the session state machine, printing a
/// status line whenever the view changes.
fn run_mirror(
    config: &AppConfig,
    source: String,
    target: String,
    deadline: Option<Duration>,
) -> Result<()> {
    let engine = EngineHandle::new(config.engine_config()).context("starting mirror engine")?;
    let mut runner = EffectRunner::new(engine);
    let mut state = AppState::new();
    let cancel_at = deadline.map(|limit| Instant::now() + limit);
    let mut cancel_sent = false;
    let mut msg = Msg::MirrorRequested { source, target };

    loop {
        let (next, effects) = update(state, msg);
        state = next;
        runner.enqueue(effects);

        let view = state.view();
        match view.phase {
            Phase::Idle => bail!("mirror request needs a non-empty source and target"),
            Phase::Failed => {
                let text = view
                    .notification
                    .as_ref()
                    .map(report::notification_text)
                    .unwrap_or_else(|| "mirror failed".to_string());
                return Err(anyhow!(text));
            }
            _ => {}
        }
        if state.consume_dirty() {
            println!("{}", report::render(&view));
        }
        if view.phase == Phase::Finished {
            return Ok(());
        }

        msg = match cancel_at {
            Some(at) if !cancel_sent && Instant::now() >= at => {
                cancel_sent = true;
                Msg::CancelClicked
            }
            _ => runner.poll(TICK),
        };
    }
}

fn run_discover(config: &AppConfig, source: &str) -> Result<()> {
    let location = SourceLocation::parse(source)?;
    let fetcher = ReqwestFetcher::new(config.fetch_settings())?;
    let crawler = Crawler::new(Arc::new(fetcher), config.crawl_settings());
    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;

    let entries = runtime.block_on(crawler.discover(&location, &NullProgressSink))?;
    for entry in entries {
        println!("{entry}");
    }
    Ok(())
}

fn run_ls(storage_root: &Path, path: &str) -> Result<()> {
    let storage = LocalStorage::new(storage_root);
    let entries = storage
        .list_files(path)
        .with_context(|| format!("listing {:?} under {}", path, storage.root().display()))?;
    for entry in entries {
        match entry.kind {
            EntryKind::Directory => println!("{}/", entry.name),
            EntryKind::File => println!("{}", entry.name),
        }
    }
    Ok(())
}
