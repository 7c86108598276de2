//! Configuration loading for peerfill.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Merging with command-line flags in [`settings`]
//!
//! # Example
//!
//! ```
//! use peerfill::config::load_config;
//! use peerfill::reconcile::MergeStrategy;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join(".peerfill.yml"), "strategy: highest").unwrap();
//!
//! let config = load_config(temp.path(), None).unwrap();
//! assert_eq!(config.strategy, Some(MergeStrategy::Highest));
//! ```
//!
//! # Configuration File Locations
//!
//! `--config <path>` if given, else `.peerfill.yml` or `.peerfill.yaml` in
//! the project root. With no file, defaults apply.

pub mod loader;
pub mod schema;
pub mod settings;

pub use loader::{find_config, load_config, load_config_file, parse_config, CONFIG_FILES};
pub use schema::{OutputMode, PeerfillConfig};
pub use settings::{Action, Settings};
