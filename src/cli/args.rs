//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::Parser;
use std::path::PathBuf;

use crate::installer::PackageManager;
use crate::reconcile::MergeStrategy;

/// Legacy single-token flag for "install into every workspace".
pub const LEGACY_WORKSPACE_INSTALL_FLAG: &str = "-ws";

/// peerfill - add the peer dependencies your installed packages expect.
#[derive(Debug, Parser)]
#[command(name = "peerfill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default .peerfill.yml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Check every workspace directory instead of the project root
    #[arg(short, long)]
    pub workspaces: bool,

    /// Install missing peers with the package manager instead of editing package.json
    #[arg(short, long)]
    pub install: bool,

    /// Show what would change without writing or installing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Which range wins when several packages require the same peer
    #[arg(long, value_enum, env = "PEERFILL_STRATEGY")]
    pub strategy: Option<MergeStrategy>,

    /// Package manager to use instead of lockfile detection
    #[arg(long, value_enum, env = "PEERFILL_INSTALLER")]
    pub installer: Option<PackageManager>,

    /// Record missing peers under devDependencies
    #[arg(short = 'D', long)]
    pub dev: bool,

    /// Also add peers marked optional in peerDependenciesMeta
    #[arg(long)]
    pub include_optional: bool,

    /// Never add these peers (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub ignore: Vec<String>,

    /// Show verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Extra arguments passed verbatim to the package manager
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "EXTRA_ARGS")]
    pub extra_args: Vec<String>,
}

/// Rewrite legacy spellings before clap sees them.
///
/// `-ws` means `--install --workspaces`, with every following token passed
/// through to the package manager untouched.
pub fn normalize_args<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut normalized = Vec::new();
    let mut iter = args.into_iter().peekable();
    let mut passthrough = false;

    while let Some(arg) = iter.next() {
        if passthrough {
            normalized.push(arg);
            continue;
        }

        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
        } else if arg == LEGACY_WORKSPACE_INSTALL_FLAG {
            normalized.push("--install".to_string());
            normalized.push("--workspaces".to_string());
            if iter.peek().map(String::as_str) != Some("--") {
                normalized.push("--".to_string());
            }
            passthrough = true;
        } else {
            normalized.push(arg);
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["peerfill"]);
        assert!(!cli.workspaces);
        assert!(!cli.install);
        assert!(cli.extra_args.is_empty());
    }

    #[test]
    fn short_workspace_flag() {
        let cli = Cli::parse_from(["peerfill", "-w"]);
        assert!(cli.workspaces);
        assert!(!cli.install);
    }

    #[test]
    fn extra_args_after_separator() {
        let cli = Cli::parse_from(["peerfill", "-w", "-i", "--", "--ignore-scripts", "-W"]);
        assert!(cli.workspaces);
        assert!(cli.install);
        assert_eq!(cli.extra_args, vec!["--ignore-scripts", "-W"]);
    }

    #[test]
    fn strategy_and_installer_values() {
        let cli = Cli::parse_from(["peerfill", "--strategy", "first", "--installer", "yarn"]);
        assert_eq!(cli.strategy, Some(MergeStrategy::First));
        assert_eq!(cli.installer, Some(PackageManager::Yarn));
    }

    #[test]
    fn ignore_is_comma_separated() {
        let cli = Cli::parse_from(["peerfill", "--ignore", "react,vue"]);
        assert_eq!(cli.ignore, vec!["react", "vue"]);
    }

    #[test]
    fn legacy_flag_expands_and_passes_rest_through() {
        let normalized = normalize_args(args(&["peerfill", "-ws", "--frozen-lockfile", "-W"]));
        assert_eq!(
            normalized,
            args(&[
                "peerfill",
                "--install",
                "--workspaces",
                "--",
                "--frozen-lockfile",
                "-W"
            ])
        );

        let cli = Cli::parse_from(normalized);
        assert!(cli.install);
        assert!(cli.workspaces);
        assert_eq!(cli.extra_args, vec!["--frozen-lockfile", "-W"]);
    }

    #[test]
    fn legacy_flag_keeps_existing_separator() {
        let normalized = normalize_args(args(&["peerfill", "-ws", "--", "-W"]));
        assert_eq!(
            normalized,
            args(&["peerfill", "--install", "--workspaces", "--", "-W"])
        );
    }

    #[test]
    fn legacy_flag_after_separator_is_untouched() {
        let normalized = normalize_args(args(&["peerfill", "--", "-ws"]));
        assert_eq!(normalized, args(&["peerfill", "--", "-ws"]));
    }

    #[test]
    fn normalize_leaves_regular_args_alone() {
        let normalized = normalize_args(args(&["peerfill", "-w", "--dry-run"]));
        assert_eq!(normalized, args(&["peerfill", "-w", "--dry-run"]));
    }
}
