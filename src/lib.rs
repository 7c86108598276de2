//! peerfill - add the peer dependencies your installed packages expect.
//!
//! peerfill scans `node_modules`, collects every `peerDependencies` entry the
//! project itself does not declare, and either records them in
//! `package.json` or installs them with the project's package manager.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - `.peerfill.yml` loading and flag merging
//! - [`error`] - Error types and result aliases
//! - [`installer`] - Package manager detection and install invocation
//! - [`manifest`] - `package.json` reading, editing and enumeration of installed packages
//! - [`reconcile`] - Version range selection and missing-peer collection
//! - [`shell`] - Shell command execution
//! - [`ui`] - Terminal output
//! - [`workspace`] - Monorepo workspace discovery
//!
//! # Example
//!
//! ```
//! use peerfill::reconcile::select_version;
//!
//! assert_eq!(select_version("^16.8.0 || ^17.0.0"), "17.0.0");
//! assert_eq!(select_version("github:user/repo"), "latest");
//! ```
//!
//! For end-to-end runs against a project directory, see the integration tests.

pub mod cli;
pub mod config;
pub mod error;
pub mod installer;
pub mod manifest;
pub mod reconcile;
pub mod shell;
pub mod ui;
pub mod workspace;

pub use error::{PeerfillError, Result};
