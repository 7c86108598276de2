//! Effective settings for a run.
//!
//! Values come from `.peerfill.yml` and are overridden by command-line flags.

use crate::cli::Cli;
use crate::config::schema::PeerfillConfig;
use crate::installer::PackageManager;
use crate::manifest::DependencyKind;
use crate::reconcile::{CollectOptions, MergeStrategy};

/// What to do with the peers found missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Record them in `package.json`.
    #[default]
    WriteManifest,
    /// Hand them to the package manager.
    Install,
}

/// Fully resolved settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub action: Action,
    pub workspaces: bool,
    pub dry_run: bool,
    pub strategy: MergeStrategy,
    pub installer: Option<PackageManager>,
    pub kind: DependencyKind,
    pub ignore: Vec<String>,
    pub include_optional: bool,
    pub extra_args: Vec<String>,
}

impl Settings {
    /// Merge the config file with command-line flags; flags win.
    pub fn resolve(config: PeerfillConfig, cli: &Cli) -> Self {
        let mut ignore = config.ignore;
        for name in &cli.ignore {
            if !ignore.contains(name) {
                ignore.push(name.clone());
            }
        }

        Self {
            action: if cli.install {
                Action::Install
            } else {
                Action::WriteManifest
            },
            workspaces: cli.workspaces,
            dry_run: cli.dry_run,
            strategy: cli.strategy.or(config.strategy).unwrap_or_default(),
            installer: cli.installer.or(config.installer),
            kind: if cli.dev || config.dev {
                DependencyKind::Development
            } else {
                DependencyKind::Runtime
            },
            ignore,
            include_optional: cli.include_optional || config.include_optional,
            extra_args: cli.extra_args.clone(),
        }
    }

    /// Options for collecting missing peers.
    pub fn collect_options(&self) -> CollectOptions {
        CollectOptions {
            strategy: self.strategy,
            ignore: self.ignore.clone(),
            include_optional: self.include_optional,
        }
    }
}
