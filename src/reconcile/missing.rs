//! Accumulation of unsatisfied peer requirements.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

use super::version::{select_version, LATEST};
use crate::manifest::{InstalledPackage, Manifest};

/// Check whether the manifest already declares `name`.
///
/// Only presence counts; the recorded range is never compared against the
/// peer's range.
pub fn is_satisfied(name: &str, manifest: &Manifest) -> bool {
    manifest.has_dependency(name)
}

/// How to combine ranges when several packages require the same peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MergeStrategy {
    /// The package enumerated last wins.
    #[default]
    Last,
    /// The package enumerated first wins.
    First,
    /// All ranges are pooled and the highest version is selected.
    Highest,
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Last => "last",
            Self::First => "first",
            Self::Highest => "highest",
        };
        write!(f, "{}", name)
    }
}

/// One peer range contributed by one installed package.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerRequirement {
    pub name: String,
    pub range: String,
    pub required_by: String,
    pub optional: bool,
}

/// A peer that needs adding, with its chosen version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPeer {
    pub name: String,
    pub version: String,
}

impl ResolvedPeer {
    /// Specifier to record: `^<version>`, or bare `latest`.
    pub fn specifier(&self) -> String {
        if self.version == LATEST {
            LATEST.to_string()
        } else {
            format!("^{}", self.version)
        }
    }

    /// `<name>@<specifier>`, as passed to a package manager.
    pub fn install_arg(&self) -> String {
        format!("{}@{}", self.name, self.specifier())
    }
}

/// Peer requirements not satisfied by the manifest, grouped by name.
#[derive(Debug, Clone, Default)]
pub struct MissingSet {
    strategy: MergeStrategy,
    entries: BTreeMap<String, Vec<PeerRequirement>>,
}

impl MissingSet {
    /// Create an empty set that merges with `strategy`.
    pub fn new(strategy: MergeStrategy) -> Self {
        Self {
            strategy,
            entries: BTreeMap::new(),
        }
    }

    /// Record a requirement.
    pub fn record(&mut self, requirement: PeerRequirement) {
        self.entries
            .entry(requirement.name.clone())
            .or_default()
            .push(requirement);
    }

    /// Number of distinct peer names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is missing.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every requirement recorded for `name`, in recording order.
    pub fn contributors(&self, name: &str) -> &[PeerRequirement] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Names whose contributors disagree on the range.
    pub fn conflicts(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, reqs)| reqs.iter().any(|r| r.range != reqs[0].range))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Choose one version per peer name, sorted by name.
    pub fn resolve(&self) -> Vec<ResolvedPeer> {
        self.entries
            .iter()
            .filter_map(|(name, reqs)| {
                let version = match self.strategy {
                    MergeStrategy::Last => select_version(&reqs.last()?.range),
                    MergeStrategy::First => select_version(&reqs.first()?.range),
                    MergeStrategy::Highest => {
                        let pooled: Vec<&str> = reqs.iter().map(|r| r.range.as_str()).collect();
                        select_version(&pooled.join("||"))
                    }
                };
                Some(ResolvedPeer {
                    name: name.clone(),
                    version,
                })
            })
            .collect()
    }
}

/// Filters applied while collecting peers.
#[derive(Debug, Clone, Default)]
pub struct CollectOptions {
    pub strategy: MergeStrategy,
    pub ignore: Vec<String>,
    pub include_optional: bool,
}

/// Fold the peer requirements of every installed package into a [`MissingSet`].
///
/// Packages are visited in the order given; peers already declared in the
/// manifest, ignored by name, or optional (unless requested) are skipped.
pub fn collect_missing(
    installed: &[InstalledPackage],
    manifest: &Manifest,
    options: &CollectOptions,
) -> MissingSet {
    let mut missing = MissingSet::new(options.strategy);

    for package in installed {
        for (name, range) in &package.manifest.peer_dependencies {
            let optional = package.manifest.is_optional_peer(name);

            if is_satisfied(name, manifest) {
                continue;
            }
            if options.ignore.iter().any(|ignored| ignored == name) {
                tracing::debug!("Ignoring peer {} of {}", name, package.name());
                continue;
            }
            if optional && !options.include_optional {
                tracing::debug!("Skipping optional peer {} of {}", name, package.name());
                continue;
            }

            tracing::debug!("{} requires peer {}@{}", package.name(), name, range);
            missing.record(PeerRequirement {
                name: name.clone(),
                range: range.clone(),
                required_by: package.name().to_string(),
                optional,
            });
        }
    }

    missing
}
