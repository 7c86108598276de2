//! Workspace discovery.
//!
//! Workspace directories come from two places, which are merged:
//! - the `workspaces` field of the root `package.json` (npm, yarn)
//! - the `packages` list of `pnpm-workspace.yaml`
//!
//! [`locate_patterns`] returns the patterns joined onto the root without
//! touching the file system further; [`expand_patterns`] turns them into
//! existing directories. Glob metacharacters in the root path itself are
//! escaped, so a checkout under `app[v2]` still matches.

use glob::Pattern;
use serde::Deserialize;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{PeerfillError, Result};
use crate::manifest::{Manifest, INSTALL_DIR, MANIFEST_FILE};

/// pnpm's workspace file name.
pub const PNPM_WORKSPACE_FILE: &str = "pnpm-workspace.yaml";

#[derive(Debug, Default, Deserialize)]
struct PnpmWorkspace {
    #[serde(default)]
    packages: Vec<String>,
}

/// Workspace patterns rooted at the project directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspacePatterns {
    /// Patterns whose matches are workspaces.
    pub include: Vec<PathBuf>,
    /// Patterns from `!`-prefixed entries; matches are dropped.
    pub exclude: Vec<PathBuf>,
}

impl WorkspacePatterns {
    /// Whether no inclusion pattern was found.
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
    }

    fn push(&mut self, root: &Path, raw: &str) {
        let raw = raw.trim();
        if raw.is_empty() {
            return;
        }

        let (target, pattern) = match raw.strip_prefix('!') {
            Some(negated) => (&mut self.exclude, negated),
            None => (&mut self.include, raw),
        };
        let pattern = pattern.trim_start_matches("./");
        let joined = escape_root(root).join(pattern);
        if !target.contains(&joined) {
            target.push(joined);
        }
    }
}

/// Read `pnpm-workspace.yaml` package globs, if the file exists.
pub fn read_pnpm_workspace(root: &Path) -> Result<Vec<String>> {
    let path = root.join(PNPM_WORKSPACE_FILE);
    if !path.is_file() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(&path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let workspace: PnpmWorkspace =
        serde_yaml::from_str(&content).map_err(|e| PeerfillError::WorkspaceConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

    Ok(workspace.packages)
}

/// Collect workspace patterns for `root`, joined onto it literally.
///
/// `packages/*` becomes `<root>/packages/*`, with `root` glob-escaped;
/// nothing is expanded.
///
/// # Errors
///
/// Returns `NoWorkspaces` if neither source declares any pattern.
/// Returns `ManifestParse` / `WorkspaceConfigParse` for malformed sources.
pub fn locate_patterns(root: &Path) -> Result<WorkspacePatterns> {
    let mut patterns = WorkspacePatterns::default();

    if root.join(MANIFEST_FILE).is_file() {
        let manifest = Manifest::load(root)?;
        if let Some(workspaces) = manifest.workspaces() {
            for pattern in workspaces.patterns() {
                patterns.push(root, &pattern);
            }
        }
    }

    for pattern in read_pnpm_workspace(root)? {
        patterns.push(root, &pattern);
    }

    if patterns.is_empty() {
        return Err(PeerfillError::NoWorkspaces {
            path: root.to_path_buf(),
        });
    }

    tracing::debug!(
        "Workspace patterns: include={:?} exclude={:?}",
        patterns.include,
        patterns.exclude
    );

    Ok(patterns)
}

/// Expand patterns into existing directories, sorted and deduplicated.
///
/// Anything inside `node_modules` is never a workspace.
pub fn expand_patterns(patterns: &WorkspacePatterns) -> Result<Vec<PathBuf>> {
    let exclusions = patterns
        .exclude
        .iter()
        .map(|p| compile(p))
        .collect::<Result<Vec<_>>>()?;

    let mut dirs = Vec::new();
    for include in &patterns.include {
        let pattern = pattern_str(include)?;
        let matches = glob::glob(pattern).map_err(|e| PeerfillError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        for path in matches.filter_map(std::result::Result::ok) {
            if !path.is_dir() || is_inside_install_dir(&path) {
                continue;
            }
            if exclusions.iter().any(|ex| ex.matches_path(&path)) {
                continue;
            }
            dirs.push(path);
        }
    }

    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}

/// Locate and expand the workspaces of `root`.
///
/// # Errors
///
/// Returns `NoWorkspaces` if no pattern is declared or none matches a directory.
pub fn discover_workspace_dirs(root: &Path) -> Result<Vec<PathBuf>> {
    let patterns = locate_patterns(root)?;
    let dirs = expand_patterns(&patterns)?;

    if dirs.is_empty() {
        return Err(PeerfillError::NoWorkspaces {
            path: root.to_path_buf(),
        });
    }

    Ok(dirs)
}

fn escape_root(root: &Path) -> PathBuf {
    match root.to_str() {
        Some(root) => PathBuf::from(Pattern::escape(root)),
        None => root.to_path_buf(),
    }
}

fn pattern_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| PeerfillError::InvalidPattern {
        pattern: path.display().to_string(),
        message: "pattern is not valid UTF-8".to_string(),
    })
}

fn compile(path: &Path) -> Result<Pattern> {
    let pattern = pattern_str(path)?;
    Pattern::new(pattern).map_err(|e| PeerfillError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn is_inside_install_dir(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(name) if name == INSTALL_DIR))
}
