//! Error types for peerfill operations.
//!
//! This module defines [`PeerfillError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Missing prerequisites (no `node_modules`, no workspaces, no lockfile) are
//!   fatal and end the process with exit code 1
//! - Malformed manifests abort the run; they are never skipped
//! - Installer failures are reported per directory and do not stop a
//!   workspace loop
//! - Unparseable version ranges are never errors (see [`crate::reconcile`])

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for peerfill operations.
#[derive(Debug, Error)]
pub enum PeerfillError {
    /// No `package.json` in the directory being checked.
    #[error("No package.json found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// A `package.json` could not be parsed.
    #[error("Failed to parse manifest at {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },

    /// The install directory (`node_modules`) does not exist.
    #[error("Install directory not found: {path}. Run your package manager's install first.")]
    InstallDirNotFound { path: PathBuf },

    /// Workspace mode was requested but no workspace directories were found.
    #[error("No workspaces found under {path}")]
    NoWorkspaces { path: PathBuf },

    /// None of the recognised lockfiles exist.
    #[error("No lockfile found in {path} (expected yarn.lock, package-lock.json or pnpm-lock.yaml)")]
    NoLockfile { path: PathBuf },

    /// `pnpm-workspace.yaml` could not be parsed.
    #[error("Failed to parse workspace file at {path}: {message}")]
    WorkspaceConfigParse { path: PathBuf, message: String },

    /// An explicitly requested config file does not exist.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// `.peerfill.yml` could not be parsed.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// A workspace glob pattern is malformed.
    #[error("Invalid workspace pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The package manager exited unsuccessfully.
    #[error("Install command failed with {}: {command}", describe_exit(.code))]
    InstallFailed { command: String, code: Option<i32> },

    /// The shell running the package manager could not be started.
    #[error("Failed to run `{command}`: {source}")]
    InstallSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PeerfillError {
    /// Whether this error means a required input is absent.
    pub fn is_missing_prerequisite(&self) -> bool {
        matches!(
            self,
            Self::ManifestNotFound { .. }
                | Self::InstallDirNotFound { .. }
                | Self::NoWorkspaces { .. }
                | Self::NoLockfile { .. }
        )
    }

    /// Whether this error came from running the package manager.
    pub fn is_install_failure(&self) -> bool {
        matches!(self, Self::InstallFailed { .. } | Self::InstallSpawn { .. })
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by a signal)".to_string(),
    }
}

/// Result type alias for peerfill operations.
pub type Result<T> = std::result::Result<T, PeerfillError>;
