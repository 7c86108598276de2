//! Installed package enumeration.

use std::fs;
use std::path::{Path, PathBuf};

use super::package_json::{PackageManifest, MANIFEST_FILE};
use crate::error::{PeerfillError, Result};

/// Directory package managers install into.
pub const INSTALL_DIR: &str = "node_modules";

/// A package found under `node_modules`.
#[derive(Debug, Clone)]
pub struct InstalledPackage {
    /// Name as laid out on disk (`react`, `@types/node`).
    pub dir_name: String,

    /// Directory holding the package.
    pub path: PathBuf,

    /// Parsed `package.json`.
    pub manifest: PackageManifest,
}

impl InstalledPackage {
    /// Display name, preferring the manifest's `name`.
    pub fn name(&self) -> &str {
        self.manifest.name.as_deref().unwrap_or(&self.dir_name)
    }
}

/// List every package in `<dir>/node_modules` that has a manifest.
///
/// Hidden entries (`.bin`, `.pnpm`, ...) are skipped and `@scope` directories
/// are descended one level. The result is sorted by on-disk name so that
/// later packages consistently override earlier ones.
///
/// # Errors
///
/// Returns `InstallDirNotFound` if `node_modules` doesn't exist.
/// Returns `ManifestParse` if any installed `package.json` is malformed.
pub fn enumerate_installed(dir: &Path) -> Result<Vec<InstalledPackage>> {
    let install_dir = dir.join(INSTALL_DIR);
    if !install_dir.is_dir() {
        return Err(PeerfillError::InstallDirNotFound { path: install_dir });
    }

    let mut candidates = Vec::new();
    for (name, path) in list_dirs(&install_dir)? {
        if name.starts_with('.') {
            continue;
        }

        if name.starts_with('@') {
            for (scoped, scoped_path) in list_dirs(&path)? {
                candidates.push((format!("{}/{}", name, scoped), scoped_path));
            }
        } else {
            candidates.push((name, path));
        }
    }

    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut packages = Vec::new();
    for (dir_name, path) in candidates {
        if !path.join(MANIFEST_FILE).is_file() {
            tracing::debug!("Skipping {}: no {}", dir_name, MANIFEST_FILE);
            continue;
        }

        let manifest = PackageManifest::load(&path)?;
        packages.push(InstalledPackage {
            dir_name,
            path,
            manifest,
        });
    }

    tracing::debug!(
        "Found {} installed packages in {}",
        packages.len(),
        install_dir.display()
    );

    Ok(packages)
}

fn list_dirs(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        // Follows symlinks, which is how pnpm lays out node_modules.
        if !path.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            dirs.push((name.to_string(), path));
        }
    }
    Ok(dirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn install(root: &Path, name: &str, manifest: &str) {
        let dir = root.join(INSTALL_DIR).join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
    }

    #[test]
    fn missing_install_dir_is_error() {
        let temp = TempDir::new().unwrap();
        let err = enumerate_installed(temp.path()).unwrap_err();
        assert!(matches!(err, PeerfillError::InstallDirNotFound { .. }));
    }

    #[test]
    fn empty_install_dir_yields_nothing() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(INSTALL_DIR)).unwrap();
        assert!(enumerate_installed(temp.path()).unwrap().is_empty());
    }

    #[test]
    fn lists_packages_sorted() {
        let temp = TempDir::new().unwrap();
        install(temp.path(), "zod", r#"{ "name": "zod" }"#);
        install(temp.path(), "axios", r#"{ "name": "axios" }"#);

        let packages = enumerate_installed(temp.path()).unwrap();
        let names: Vec<_> = packages.iter().map(|p| p.dir_name.as_str()).collect();
        assert_eq!(names, vec!["axios", "zod"]);
    }

    #[test]
    fn descends_into_scopes() {
        let temp = TempDir::new().unwrap();
        install(temp.path(), "@types/node", r#"{ "name": "@types/node" }"#);
        install(temp.path(), "@emotion/react", r#"{ "name": "@emotion/react" }"#);

        let packages = enumerate_installed(temp.path()).unwrap();
        let names: Vec<_> = packages.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["@emotion/react", "@types/node"]);
    }

    #[test]
    fn skips_hidden_and_manifestless_dirs() {
        let temp = TempDir::new().unwrap();
        install(temp.path(), "react", r#"{ "name": "react" }"#);
        fs::create_dir_all(temp.path().join(INSTALL_DIR).join(".bin")).unwrap();
        fs::create_dir_all(temp.path().join(INSTALL_DIR).join("empty")).unwrap();
        fs::write(temp.path().join(INSTALL_DIR).join(".package-lock.json"), "{}").unwrap();

        let packages = enumerate_installed(temp.path()).unwrap();
        assert_eq!(packages.len(), 1);
        assert_eq!(packages[0].name(), "react");
    }

    #[test]
    fn malformed_installed_manifest_aborts() {
        let temp = TempDir::new().unwrap();
        install(temp.path(), "broken", "{ nope");

        let err = enumerate_installed(temp.path()).unwrap_err();
        assert!(matches!(err, PeerfillError::ManifestParse { .. }));
    }

    #[test]
    fn name_falls_back_to_dir_name() {
        let temp = TempDir::new().unwrap();
        install(temp.path(), "anonymous", "{}");

        let packages = enumerate_installed(temp.path()).unwrap();
        assert_eq!(packages[0].name(), "anonymous");
    }
}
