//! Configuration file discovery and loading.

use crate::config::schema::PeerfillConfig;
use crate::error::{PeerfillError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names, checked in order.
pub const CONFIG_FILES: &[&str] = &[".peerfill.yml", ".peerfill.yaml"];

/// Find the project config in `project_root`.
pub fn find_config(project_root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParse` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<PeerfillConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PeerfillError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PeerfillError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`PeerfillConfig`].
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<PeerfillConfig> {
    if content.trim().is_empty() {
        return Ok(PeerfillConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| PeerfillError::ConfigParse {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the config for a project.
///
/// An explicit path must exist; otherwise the project root is searched and
/// a missing file means defaults.
pub fn load_config(project_root: &Path, explicit: Option<&Path>) -> Result<PeerfillConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => find_config(project_root),
    };

    match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)
        }
        None => Ok(PeerfillConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::MergeStrategy;
    use tempfile::TempDir;

    #[test]
    fn missing_config_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config, PeerfillConfig::default());
    }

    #[test]
    fn discovers_yml_then_yaml() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".peerfill.yaml"), "strategy: first").unwrap();
        assert_eq!(
            find_config(temp.path()),
            Some(temp.path().join(".peerfill.yaml"))
        );

        fs::write(temp.path().join(".peerfill.yml"), "strategy: highest").unwrap();
        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.strategy, Some(MergeStrategy::Highest));
    }

    #[test]
    fn explicit_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(&temp.path().join("nope.yml"))).unwrap_err();
        assert!(matches!(err, PeerfillError::ConfigNotFound { .. }));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".peerfill.yml");
        fs::write(&path, "ignore: [unclosed").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, PeerfillError::ConfigParse { .. }));
    }

    #[test]
    fn empty_file_is_default() {
        let config = parse_config("  \n", Path::new(".peerfill.yml")).unwrap();
        assert_eq!(config, PeerfillConfig::default());
    }
}
