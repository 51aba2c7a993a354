//! Package manager selection and installer process management
//!
//! This module provides:
//! - Package manager detection (yarn vs npm) and argument conventions
//! - The installer passes and the process runner abstraction

pub mod installer;
pub mod package_manager;

pub use installer::{
    run_pass, CommandRunner, InstallFailure, InstallPass, Invocation, SystemRunner,
};
pub use package_manager::{DependencyKind, PackageManager, YARN_LOCK};
