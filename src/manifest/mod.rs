//! Manifest store and installed package enumeration.

pub mod installed;
pub mod package_json;

pub use installed::{enumerate_installed, InstalledPackage, INSTALL_DIR};
pub use package_json::{
    DependencyKind, Manifest, PackageManifest, PeerMeta, Workspaces, MANIFEST_FILE,
};
