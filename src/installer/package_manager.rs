//! Package manager detection.

use serde::Deserialize;
use std::fmt;
use std::path::Path;

use crate::error::{PeerfillError, Result};

/// A package manager peerfill knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Yarn,
    Npm,
    Pnpm,
}

/// Lockfiles in detection priority order.
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
    ("pnpm-lock.yaml", PackageManager::Pnpm),
];

impl PackageManager {
    /// Executable name.
    pub fn command(&self) -> &'static str {
        match self {
            Self::Yarn => "yarn",
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
        }
    }

    /// Subcommand that adds packages to the manifest.
    pub fn add_verb(&self) -> &'static str {
        match self {
            Self::Yarn | Self::Pnpm => "add",
            Self::Npm => "install",
        }
    }

    /// Lockfile that identifies this package manager.
    pub fn lockfile(&self) -> &'static str {
        LOCKFILES
            .iter()
            .find(|(_, pm)| pm == self)
            .map(|(file, _)| *file)
            .unwrap_or_default()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.command())
    }
}

/// Detect the package manager from the lockfile in `dir`.
///
/// Checks `yarn.lock`, then `package-lock.json`, then `pnpm-lock.yaml`.
///
/// # Errors
///
/// Returns `NoLockfile` if none of them exist.
pub fn detect_package_manager(dir: &Path) -> Result<PackageManager> {
    LOCKFILES
        .iter()
        .find(|(file, _)| dir.join(file).exists())
        .map(|(file, pm)| {
            tracing::debug!("Detected {} from {}", pm, file);
            *pm
        })
        .ok_or_else(|| PeerfillError::NoLockfile {
            path: dir.to_path_buf(),
        })
}
