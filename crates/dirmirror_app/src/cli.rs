//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Discover and mirror remote file trees into local storage.
///
/// A source is scanned with a manifest file if one exists, otherwise by
/// reading its HTML or JSON directory listing, within depth and entry bounds.
#[derive(Parser, Debug)]
#[command(name = "dirmirror")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// RON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Deepest directory level to scan; the source root is level 0
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    /// Maximum number of files a single scan may return
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_entries: Option<u64>,

    /// Directory that holds mirrored targets
    #[arg(long, global = true)]
    pub storage_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replace TARGET in storage with a fresh copy of SOURCE
    Mirror {
        /// Absolute http(s) URL of the remote directory
        source: String,
        /// Storage directory to write into
        target: String,
        /// Cancel the run if it is still going after this many seconds
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        deadline: Option<u64>,
    },
    /// List the files SOURCE would mirror without downloading them
    Discover {
        /// Absolute http(s) URL of the remote directory
        source: String,
    },
    /// List a directory in storage
    Ls {
        /// Storage path; the storage root when omitted
        #[arg(default_value = "")]
        path: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_command_parses_positionals_and_deadline() {
        let cli = Cli::try_parse_from([
            "dirmirror",
            "mirror",
            "https://cdn.example.com/assets/",
            "assets",
            "--deadline",
            "30",
        ])
        .unwrap();
        match cli.command {
            Command::Mirror {
                source,
                target,
                deadline,
            } => {
                assert_eq!(source, "https://cdn.example.com/assets/");
                assert_eq!(target, "assets");
                assert_eq!(deadline, Some(30));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "dirmirror",
            "discover",
            "https://cdn.example.com/",
            "-vv",
            "--max-depth",
            "2",
            "--max-entries",
            "10",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.max_depth, Some(2));
        assert_eq!(cli.max_entries, Some(10));
    }

    #[test]
    fn ls_defaults_to_storage_root() {
        let cli = Cli::try_parse_from(["dirmirror", "ls"]).unwrap();
        assert!(matches!(cli.command, Command::Ls { path } if path.is_empty()));
    }

    #[test]
    fn zero_max_entries_is_rejected() {
        let err = Cli::try_parse_from(["dirmirror", "ls", "--max-entries", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["dirmirror"]).is_err());
    }
}
