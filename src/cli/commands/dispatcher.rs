//! Command dispatching.
//!
//! This module provides:
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for running the check in one directory or across
//!   every workspace

use std::path::{Path, PathBuf};

use super::check::{CheckCommand, CheckOutcome};
use crate::config::{Action, Settings};
use crate::error::Result;
use crate::installer::{detect_package_manager, Installer, PackageManager};
use crate::workspace::discover_workspace_dirs;
use crate::ui::UserInterface;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use.
    pub exit_code: i32,

    /// One entry per directory that was checked to completion.
    pub outcomes: Vec<CheckOutcome>,

    /// Directories whose install command failed.
    pub failed: Vec<PathBuf>,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            exit_code: 0,
            outcomes: Vec::new(),
            failed: Vec::new(),
        }
    }
}

/// Runs checks for the project root or its workspaces.
pub struct CommandDispatcher {
    project_root: PathBuf,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self { project_root }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Run the check for every target directory.
    ///
    /// In workspace mode, directories missing a manifest or `node_modules`
    /// are skipped with a warning, and a failed install does not stop the
    /// remaining workspaces. Any other error aborts the run.
    pub fn dispatch(
        &self,
        settings: &Settings,
        ui: &mut dyn UserInterface,
        installer: &mut dyn Installer,
    ) -> Result<CommandResult> {
        let package_manager = self.package_manager(settings)?;

        let dirs = if settings.workspaces {
            let dirs = discover_workspace_dirs(&self.project_root)?;
            ui.message(&format!("Found {} workspaces", dirs.len()));
            dirs
        } else {
            vec![self.project_root.clone()]
        };

        let mut result = CommandResult::success();

        for dir in &dirs {
            if settings.workspaces {
                ui.show_header(&self.display_path(dir));
            }

            let check = CheckCommand::new(dir, settings, package_manager);
            match check.execute(ui, installer) {
                Ok(outcome) => result.outcomes.push(outcome),
                Err(e) if e.is_install_failure() => {
                    tracing::error!("Install failed in {}: {}", dir.display(), e);
                    ui.error(&e.to_string());
                    result.failed.push(dir.clone());
                }
                Err(e) if settings.workspaces && e.is_missing_prerequisite() => {
                    ui.warning(&format!("Skipping {}: {}", self.display_path(dir), e));
                }
                Err(e) => return Err(e),
            }
        }

        if settings.workspaces && dirs.len() > 1 {
            let changed = result
                .outcomes
                .iter()
                .filter(|o| !o.peers.is_empty())
                .count();
            ui.message(&format!(
                "Checked {} workspaces: {} with missing peers, {} failed installs",
                dirs.len(),
                changed,
                result.failed.len()
            ));
        }

        Ok(result)
    }

    fn package_manager(&self, settings: &Settings) -> Result<Option<PackageManager>> {
        if settings.action != Action::Install {
            return Ok(None);
        }

        let pm = match settings.installer {
            Some(pm) => pm,
            None => detect_package_manager(&self.project_root)?,
        };
        tracing::debug!("Using {} ({})", pm, pm.lockfile());
        Ok(Some(pm))
    }

    fn display_path(&self, dir: &Path) -> String {
        dir.strip_prefix(&self.project_root)
            .unwrap_or(dir)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PeerfillError;
    use crate::installer::RecordingInstaller;
    use crate::manifest::{Manifest, INSTALL_DIR, MANIFEST_FILE};
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn monorepo() -> TempDir {
        let temp = TempDir::new().unwrap();
        write(temp.path(), MANIFEST_FILE, r#"{ "name": "root", "private": true }"#);
        write(temp.path(), "yarn.lock", "");
        write(temp.path(), "pnpm-workspace.yaml", "packages:\n  - packages/*\n");

        for name in ["a", "b"] {
            write(
                temp.path(),
                &format!("packages/{}/{}", name, MANIFEST_FILE),
                &format!(r#"{{ "name": "{}" }}"#, name),
            );
            write(
                temp.path(),
                &format!("packages/{}/{}/lib/{}", name, INSTALL_DIR, MANIFEST_FILE),
                r#"{ "name": "lib", "peerDependencies": { "react": "^18.0.0" } }"#,
            );
        }
        temp
    }

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert_eq!(result.exit_code, 0);
        assert!(result.outcomes.is_empty());
        assert!(result.failed.is_empty());
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn workspace_mode_checks_every_workspace() {
        let temp = monorepo();
        let settings = Settings {
            workspaces: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut installer = RecordingInstaller::new();

        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&settings, &mut ui, &mut installer)
            .unwrap();

        assert_eq!(result.outcomes.len(), 2);
        assert_eq!(ui.headers(), &["packages/a".to_string(), "packages/b".to_string()]);
        for name in ["a", "b"] {
            let manifest = Manifest::load(&temp.path().join("packages").join(name)).unwrap();
            assert_eq!(manifest.dependencies()["react"], "^18.0.0");
        }
    }

    #[test]
    fn workspace_install_continues_after_failure() {
        let temp = monorepo();
        let settings = Settings {
            action: Action::Install,
            workspaces: true,
            extra_args: vec!["--ignore-workspace-root-check".to_string()],
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut installer = RecordingInstaller::new();
        installer.fail_in(&temp.path().join("packages/a"));

        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&settings, &mut ui, &mut installer)
            .unwrap();

        assert_eq!(installer.invocations().len(), 2);
        assert_eq!(result.failed, vec![temp.path().join("packages/a")]);
        assert_eq!(result.outcomes.len(), 1);
        assert_eq!(result.exit_code, 0);
        assert!(ui.has_error("Install command failed"));
        assert_eq!(
            installer.invocations()[1].command,
            "yarn add react@^18.0.0 --ignore-workspace-root-check"
        );
    }

    #[test]
    fn workspace_without_node_modules_is_skipped() {
        let temp = monorepo();
        fs::remove_dir_all(temp.path().join("packages/b").join(INSTALL_DIR)).unwrap();
        let settings = Settings {
            workspaces: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut installer = RecordingInstaller::new();

        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&settings, &mut ui, &mut installer)
            .unwrap();

        assert_eq!(result.outcomes.len(), 1);
        assert!(ui.has_warning("Skipping packages/b"));
    }

    #[test]
    fn missing_workspaces_is_fatal() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), MANIFEST_FILE, "{}");
        let settings = Settings {
            workspaces: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut installer = RecordingInstaller::new();

        let err = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&settings, &mut ui, &mut installer)
            .unwrap_err();
        assert!(matches!(err, PeerfillError::NoWorkspaces { .. }));
    }

    #[test]
    fn install_without_lockfile_is_fatal() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), MANIFEST_FILE, "{}");
        fs::create_dir(temp.path().join(INSTALL_DIR)).unwrap();
        let settings = Settings {
            action: Action::Install,
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut installer = RecordingInstaller::new();

        let err = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&settings, &mut ui, &mut installer)
            .unwrap_err();
        assert!(matches!(err, PeerfillError::NoLockfile { .. }));
    }

    #[test]
    fn configured_installer_skips_detection() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), MANIFEST_FILE, "{}");
        write(
            temp.path(),
            &format!("{}/lib/{}", INSTALL_DIR, MANIFEST_FILE),
            r#"{ "peerDependencies": { "left-pad": ">=1.0.0" } }"#,
        );
        let settings = Settings {
            action: Action::Install,
            installer: Some(PackageManager::Pnpm),
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut installer = RecordingInstaller::new();

        CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&settings, &mut ui, &mut installer)
            .unwrap();
        assert_eq!(installer.invocations()[0].command, "pnpm add left-pad@^1.0.0");
    }

    #[test]
    fn malformed_manifest_aborts_workspace_loop() {
        let temp = monorepo();
        write(temp.path(), &format!("packages/a/{}", MANIFEST_FILE), "{ broken");
        let settings = Settings {
            workspaces: true,
            ..Default::default()
        };
        let mut ui = MockUI::new();
        let mut installer = RecordingInstaller::new();

        let err = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&settings, &mut ui, &mut installer)
            .unwrap_err();
        assert!(matches!(err, PeerfillError::ManifestParse { .. }));
    }
}
