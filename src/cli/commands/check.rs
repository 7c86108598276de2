//! Check command implementation.
//!
//! Runs the whole sequence for one directory: load the manifest, enumerate
//! installed packages, collect missing peers, then write or install them.

use std::path::{Path, PathBuf};

use crate::config::{Action, Settings};
use crate::error::{PeerfillError, Result};
use crate::installer::{build_install_command, Installer, PackageManager};
use crate::manifest::{enumerate_installed, Manifest};
use crate::reconcile::{collect_missing, MissingSet, ResolvedPeer};
use crate::ui::UserInterface;

/// What a check ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    /// Nothing was missing.
    Satisfied,
    /// Missing peers were written to `package.json`.
    Written,
    /// Missing peers were handed to the package manager.
    Installed,
    /// Missing peers were only reported.
    DryRun,
}

/// Result of checking one directory.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub dir: PathBuf,
    pub status: CheckStatus,
    pub peers: Vec<ResolvedPeer>,
}

/// Reconciles the peers of one directory.
pub struct CheckCommand<'a> {
    dir: PathBuf,
    settings: &'a Settings,
    package_manager: Option<PackageManager>,
}

impl<'a> CheckCommand<'a> {
    /// Create a check for `dir`.
    ///
    /// `package_manager` is required when the action is [`Action::Install`].
    pub fn new(
        dir: &Path,
        settings: &'a Settings,
        package_manager: Option<PackageManager>,
    ) -> Self {
        Self {
            dir: dir.to_path_buf(),
            settings,
            package_manager,
        }
    }

    /// Get the directory being checked.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Run the check.
    pub fn execute(
        &self,
        ui: &mut dyn UserInterface,
        installer: &mut dyn Installer,
    ) -> Result<CheckOutcome> {
        let mut manifest = Manifest::load(&self.dir)?;
        let installed = enumerate_installed(&self.dir)?;
        ui.detail(&format!(
            "Checking {} installed packages in {}",
            installed.len(),
            self.dir.display()
        ));

        let missing = collect_missing(&installed, &manifest, &self.settings.collect_options());
        self.warn_conflicts(&missing, ui);

        if missing.is_empty() {
            ui.success("All peer dependencies are satisfied");
            return Ok(self.outcome(CheckStatus::Satisfied, Vec::new()));
        }

        let peers = missing.resolve();
        tracing::info!(
            "{} missing peer dependencies in {}",
            peers.len(),
            self.dir.display()
        );
        for peer in &peers {
            let required_by: Vec<&str> = missing
                .contributors(&peer.name)
                .iter()
                .map(|r| r.required_by.as_str())
                .collect();
            ui.message(&format!(
                "  {} (required by {})",
                peer.install_arg(),
                required_by.join(", ")
            ));
        }

        match self.settings.action {
            Action::WriteManifest => {
                let kind = self.settings.kind;
                if self.settings.dry_run {
                    ui.message(&format!(
                        "Dry run: would add {} peers to {} in {}",
                        peers.len(),
                        kind.key(),
                        manifest.path().display()
                    ));
                    return Ok(self.outcome(CheckStatus::DryRun, peers));
                }

                for peer in &peers {
                    manifest.add_dependency(kind, &peer.name, &peer.specifier())?;
                }
                manifest.save()?;
                ui.success(&format!(
                    "Added {} peer dependencies to {} in {}",
                    peers.len(),
                    kind.key(),
                    manifest.path().display()
                ));
                Ok(self.outcome(CheckStatus::Written, peers))
            }
            Action::Install => {
                let pm = self
                    .package_manager
                    .ok_or_else(|| PeerfillError::NoLockfile {
                        path: self.dir.clone(),
                    })?;
                let command = build_install_command(pm, &peers, &self.settings.extra_args);

                if self.settings.dry_run {
                    ui.message(&format!("Dry run: would run `{}`", command));
                    return Ok(self.outcome(CheckStatus::DryRun, peers));
                }

                ui.message(&format!("Running `{}`", command));
                installer.install(&self.dir, pm, &peers, &self.settings.extra_args)?;
                ui.success(&format!("Installed {} peer dependencies", peers.len()));
                Ok(self.outcome(CheckStatus::Installed, peers))
            }
        }
    }

    fn warn_conflicts(&self, missing: &MissingSet, ui: &mut dyn UserInterface) {
        for name in missing.conflicts() {
            let ranges: Vec<String> = missing
                .contributors(name)
                .iter()
                .map(|r| format!("{} wants {}", r.required_by, r.range))
                .collect();
            ui.warning(&format!(
                "{} is required with different ranges ({}); using the {} range",
                name,
                ranges.join(", "),
                self.settings.strategy
            ));
        }
    }

    fn outcome(&self, status: CheckStatus, peers: Vec<ResolvedPeer>) -> CheckOutcome {
        CheckOutcome {
            dir: self.dir.clone(),
            status,
            peers,
        }
    }
}
