//! Configuration schema definitions for peerfill.
//!
//! This module contains the struct definitions that map to the
//! `.peerfill.yml` file format.

use serde::Deserialize;

use crate::installer::PackageManager;
use crate::reconcile::MergeStrategy;

/// Root configuration structure for `.peerfill.yml`.
///
/// Every field is optional; command-line flags override what is set here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PeerfillConfig {
    /// How to merge ranges when several packages require the same peer.
    pub strategy: Option<MergeStrategy>,

    /// Package manager to use instead of lockfile detection.
    pub installer: Option<PackageManager>,

    /// Record missing peers under `devDependencies`.
    pub dev: bool,

    /// Peer names never to add.
    pub ignore: Vec<String>,

    /// Also add peers marked optional in `peerDependenciesMeta`.
    pub include_optional: bool,

    /// Default output mode.
    pub output: Option<OutputMode>,
}

/// Output mode as written in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Verbose,
    Normal,
    Quiet,
    Silent,
}
