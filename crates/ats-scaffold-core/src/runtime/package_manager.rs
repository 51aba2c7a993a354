//! Package manager detection and argument conventions

use anyhow::{Context, Result};
use std::fmt;
use std::path::Path;

/// Lockfile whose presence selects yarn
pub const YARN_LOCK: &str = "yarn.lock";

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManager {
    Yarn,
    Npm,
}

/// Whether packages land in `dependencies` or `devDependencies`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyKind {
    Regular,
    Dev,
}

impl PackageManager {
    /// Pick yarn when the app already has a `yarn.lock`, npm otherwise
    pub async fn detect(app_path: &Path) -> Result<Self> {
        let lockfile = app_path.join(YARN_LOCK);
        let use_yarn = tokio::fs::try_exists(&lockfile)
            .await
            .with_context(|| format!("Failed to check {}", lockfile.display()))?;
        Ok(if use_yarn { Self::Yarn } else { Self::Npm })
    }

    /// Executable to spawn
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// Name shown to the user, independent of how the binary is distributed (e.g. `yarnpkg`)
    pub fn display_name(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "yarn",
            PackageManager::Npm => "npm",
        }
    }

    /// Prefix needed before custom script names (`npm run build` vs `yarn build`)
    pub fn run_prefix(&self) -> &'static str {
        match self {
            PackageManager::Yarn => "",
            PackageManager::Npm => "run ",
        }
    }

    /// Leading arguments of an install command; package specs are appended by the caller
    pub fn install_args(&self, kind: DependencyKind, verbose: bool) -> Vec<String> {
        let mut args: Vec<String> = match (self, kind) {
            (PackageManager::Yarn, DependencyKind::Regular) => vec!["add".into()],
            (PackageManager::Yarn, DependencyKind::Dev) => vec!["add".into(), "-D".into()],
            (PackageManager::Npm, DependencyKind::Regular) => {
                vec!["install".into(), "--save".into()]
            }
            (PackageManager::Npm, DependencyKind::Dev) => {
                vec!["install".into(), "--save-dev".into()]
            }
        };
        if verbose && *self == PackageManager::Npm {
            args.push("--verbose".into());
        }
        args
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
