//! `package.json` reading and writing.
//!
//! The root manifest is kept as a raw JSON value so that fields peerfill does
//! not know about survive a write-back untouched, in their original order.
//! Installed packages are only ever read, so they get a typed view.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PeerfillError, Result};

/// File name of a package manifest.
pub const MANIFEST_FILE: &str = "package.json";

/// Which dependency map an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DependencyKind {
    /// `dependencies`
    #[default]
    Runtime,
    /// `devDependencies`
    Development,
}

impl DependencyKind {
    /// The JSON key holding this kind of dependency.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Runtime => "dependencies",
            Self::Development => "devDependencies",
        }
    }
}

/// The `workspaces` field, in any of the forms package managers accept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Workspaces {
    /// `"workspaces": ["packages/*"]`
    List(Vec<String>),
    /// `"workspaces": "packages/*"`
    Single(String),
    /// `"workspaces": { "packages": ["packages/*"] }` (yarn)
    Object {
        #[serde(default)]
        packages: Vec<String>,
    },
}

impl Workspaces {
    /// Flatten into a list of patterns.
    pub fn patterns(&self) -> Vec<String> {
        match self {
            Self::List(list) => list.clone(),
            Self::Single(pattern) => vec![pattern.clone()],
            Self::Object { packages } => packages.clone(),
        }
    }
}

/// A project manifest loaded for reconciliation.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    value: Value,
}

impl Manifest {
    /// Load `<dir>/package.json`.
    ///
    /// # Errors
    ///
    /// Returns `ManifestNotFound` if the file doesn't exist.
    /// Returns `ManifestParse` if the JSON is invalid or not an object.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let content = read_manifest(&path)?;
        Self::parse(&content, &path)
    }

    /// Parse manifest content.
    ///
    /// # Arguments
    ///
    /// * `content` - The JSON content to parse
    /// * `path` - Where the manifest lives; used for saving and error reporting
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| PeerfillError::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if !value.is_object() {
            return Err(PeerfillError::ManifestParse {
                path: path.to_path_buf(),
                message: "top-level value is not an object".to_string(),
            });
        }

        Ok(Self {
            path: path.to_path_buf(),
            value,
        })
    }

    /// Path of the manifest file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `name` field, if any.
    pub fn name(&self) -> Option<&str> {
        self.value.get("name").and_then(Value::as_str)
    }

    /// Runtime dependencies.
    pub fn dependencies(&self) -> BTreeMap<String, String> {
        self.dependency_map(DependencyKind::Runtime)
    }

    /// Development dependencies.
    pub fn dev_dependencies(&self) -> BTreeMap<String, String> {
        self.dependency_map(DependencyKind::Development)
    }

    fn dependency_map(&self, kind: DependencyKind) -> BTreeMap<String, String> {
        self.value
            .get(kind.key())
            .and_then(Value::as_object)
            .map(|map| {
                map.iter()
                    .map(|(name, range)| {
                        let range = range
                            .as_str()
                            .map(String::from)
                            .unwrap_or_else(|| range.to_string());
                        (name.clone(), range)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether `name` is a key of either dependency map.
    pub fn has_dependency(&self, name: &str) -> bool {
        [DependencyKind::Runtime, DependencyKind::Development]
            .iter()
            .any(|kind| {
                self.value
                    .get(kind.key())
                    .and_then(Value::as_object)
                    .is_some_and(|map| map.contains_key(name))
            })
    }

    /// The `workspaces` field, if present and well-formed.
    pub fn workspaces(&self) -> Option<Workspaces> {
        let raw = self.value.get("workspaces")?;
        match serde_json::from_value(raw.clone()) {
            Ok(workspaces) => Some(workspaces),
            Err(e) => {
                tracing::warn!(
                    "Ignoring malformed workspaces field in {}: {}",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Insert or replace a dependency, creating the map if needed.
    ///
    /// # Errors
    ///
    /// Returns `ManifestParse` if the dependency field exists but is not an
    /// object; the manifest is left unchanged.
    pub fn add_dependency(
        &mut self,
        kind: DependencyKind,
        name: &str,
        specifier: &str,
    ) -> Result<()> {
        let map = self.value.as_object_mut().and_then(|root| {
            root.entry(kind.key())
                .or_insert_with(|| Value::Object(Map::new()))
                .as_object_mut()
        });

        match map {
            Some(map) => {
                map.insert(name.to_string(), Value::String(specifier.to_string()));
                Ok(())
            }
            None => Err(PeerfillError::ManifestParse {
                path: self.path.clone(),
                message: format!("`{}` is not an object", kind.key()),
            }),
        }
    }

    /// Write the manifest back as 2-space indented JSON.
    pub fn save(&self) -> Result<()> {
        let mut content = serde_json::to_string_pretty(&self.value)
            .map_err(|e| PeerfillError::Other(e.into()))?;
        content.push('\n');
        fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Metadata for a single peer, from `peerDependenciesMeta`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PeerMeta {
    #[serde(default)]
    pub optional: bool,
}

/// The parts of an installed package's manifest that peerfill reads.
///
/// Published manifests are not always tidy: a `null` map reads as empty and
/// entries of the wrong shape are skipped.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    pub name: Option<String>,
    pub version: Option<String>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub peer_dependencies: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "lenient_map")]
    pub peer_dependencies_meta: BTreeMap<String, PeerMeta>,
}

fn lenient_map<'de, D, T>(deserializer: D) -> std::result::Result<BTreeMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let map = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => map,
        Some(other) => {
            tracing::debug!("Ignoring non-object peer field: {}", other);
            return Ok(BTreeMap::new());
        }
        None => return Ok(BTreeMap::new()),
    };

    Ok(map
        .into_iter()
        .filter_map(|(name, value)| match serde_json::from_value(value.clone()) {
            Ok(parsed) => Some((name, parsed)),
            Err(_) => {
                tracing::debug!("Skipping peer entry {} with value {}", name, value);
                None
            }
        })
        .collect())
}

impl PackageManifest {
    /// Load an installed package's `package.json`.
    pub fn load(package_dir: &Path) -> Result<Self> {
        let path = package_dir.join(MANIFEST_FILE);
        let content = read_manifest(&path)?;
        serde_json::from_str(&content).map_err(|e| PeerfillError::ManifestParse {
            path,
            message: e.to_string(),
        })
    }

    /// Whether the peer is marked optional in `peerDependenciesMeta`.
    pub fn is_optional_peer(&self, name: &str) -> bool {
        self.peer_dependencies_meta
            .get(name)
            .is_some_and(|meta| meta.optional)
    }
}

fn read_manifest(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PeerfillError::ManifestNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PeerfillError::Io(e)
        }
    })
}
