//! Peer dependency reconciliation.
//!
//! This module decides which peers are missing from a manifest and which
//! single version to add for each:
//! - [`version`] - Range normalization, token validation and version selection
//! - [`missing`] - Satisfaction checks and per-name accumulation
//!
//! # Example
//!
//! ```
//! use peerfill::reconcile::{select_version, MergeStrategy, MissingSet, PeerRequirement};
//!
//! let mut missing = MissingSet::new(MergeStrategy::Last);
//! missing.record(PeerRequirement {
//!     name: "react".to_string(),
//!     range: "^17.0.0 || ^18.0.0".to_string(),
//!     required_by: "react-redux".to_string(),
//!     optional: false,
//! });
//!
//! let resolved = missing.resolve();
//! assert_eq!(resolved[0].specifier(), "^18.0.0");
//! assert_eq!(select_version("workspace:*"), "latest");
//! ```

pub mod missing;
pub mod version;

pub use missing::{
    collect_missing, is_satisfied, CollectOptions, MergeStrategy, MissingSet, PeerRequirement,
    ResolvedPeer,
};
pub use version::{compare_versions, is_valid_version_token, normalize, select_version, LATEST};
