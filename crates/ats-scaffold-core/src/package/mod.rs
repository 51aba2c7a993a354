//! Package descriptor handling
//!
//! This module provides:
//! - The fixed scripts, coverage globs, and dependency sets (`defaults`)
//! - Loading, rewriting, and saving `package.json` (`descriptor`)

pub mod defaults;
pub mod descriptor;

pub use descriptor::{read_package_name, ManifestError, PackageJson, PACKAGE_JSON};
