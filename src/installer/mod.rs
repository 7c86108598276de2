//! Package manager invocation.
//!
//! This module provides:
//! - [`PackageManager`] detection from lockfiles
//! - [`Installer`] trait so the install step can be swapped out in tests
//! - [`ShellInstaller`] which runs the real package manager
//! - [`RecordingInstaller`] which only records what it was asked to do

pub mod package_manager;

pub use package_manager::{detect_package_manager, PackageManager};

use std::path::{Path, PathBuf};

use crate::error::{PeerfillError, Result};
use crate::reconcile::ResolvedPeer;
use crate::shell::{execute, quote_arg, CommandOptions};

/// Build `<installer> <verb> <name>@<spec> ... <extra args>`.
pub fn build_install_command(
    pm: PackageManager,
    peers: &[ResolvedPeer],
    extra_args: &[String],
) -> String {
    let mut parts = vec![pm.command().to_string(), pm.add_verb().to_string()];
    parts.extend(peers.iter().map(|peer| quote_arg(&peer.install_arg())));
    parts.extend(extra_args.iter().map(|arg| quote_arg(arg)));
    parts.join(" ")
}

/// Installs a set of peers into a directory.
pub trait Installer {
    /// Install `peers` in `dir` using `pm`, appending `extra_args`.
    fn install(
        &mut self,
        dir: &Path,
        pm: PackageManager,
        peers: &[ResolvedPeer],
        extra_args: &[String],
    ) -> Result<()>;
}

/// Runs the package manager through the shell with inherited stdio.
#[derive(Debug, Default)]
pub struct ShellInstaller;

impl ShellInstaller {
    pub fn new() -> Self {
        Self
    }
}

impl Installer for ShellInstaller {
    fn install(
        &mut self,
        dir: &Path,
        pm: PackageManager,
        peers: &[ResolvedPeer],
        extra_args: &[String],
    ) -> Result<()> {
        let command = build_install_command(pm, peers, extra_args);
        tracing::debug!("Running {} in {}", command, dir.display());

        let options = CommandOptions {
            cwd: Some(dir.to_path_buf()),
            ..Default::default()
        };
        let result = execute(&command, &options)?;

        if result.success {
            tracing::debug!("{} finished in {:?}", pm, result.duration);
            Ok(())
        } else {
            Err(PeerfillError::InstallFailed {
                command,
                code: result.exit_code,
            })
        }
    }
}

/// One call made to a [`RecordingInstaller`].
#[derive(Debug, Clone, PartialEq)]
pub struct InstallInvocation {
    pub dir: PathBuf,
    pub package_manager: PackageManager,
    pub peers: Vec<ResolvedPeer>,
    pub extra_args: Vec<String>,
    pub command: String,
}

/// Test double that records invocations instead of spawning a process.
///
/// # Example
///
/// ```
/// use peerfill::installer::{Installer, PackageManager, RecordingInstaller};
/// use peerfill::reconcile::ResolvedPeer;
/// use std::path::Path;
///
/// let mut installer = RecordingInstaller::new();
/// let peers = vec![ResolvedPeer { name: "left-pad".into(), version: "1.0.0".into() }];
/// installer.install(Path::new("/app"), PackageManager::Yarn, &peers, &[]).unwrap();
///
/// assert_eq!(installer.invocations()[0].command, "yarn add left-pad@^1.0.0");
/// ```
#[derive(Debug, Default)]
pub struct RecordingInstaller {
    invocations: Vec<InstallInvocation>,
    failing_dirs: Vec<PathBuf>,
}

impl RecordingInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make installs in `dir` fail with exit code 1.
    pub fn fail_in(&mut self, dir: &Path) {
        self.failing_dirs.push(dir.to_path_buf());
    }

    /// Get all recorded invocations.
    pub fn invocations(&self) -> &[InstallInvocation] {
        &self.invocations
    }
}

impl Installer for RecordingInstaller {
    fn install(
        &mut self,
        dir: &Path,
        pm: PackageManager,
        peers: &[ResolvedPeer],
        extra_args: &[String],
    ) -> Result<()> {
        let command = build_install_command(pm, peers, extra_args);
        self.invocations.push(InstallInvocation {
            dir: dir.to_path_buf(),
            package_manager: pm,
            peers: peers.to_vec(),
            extra_args: extra_args.to_vec(),
            command: command.clone(),
        });

        if self.failing_dirs.iter().any(|d| d == dir) {
            return Err(PeerfillError::InstallFailed {
                command,
                code: Some(1),
            });
        }
        Ok(())
    }
}
