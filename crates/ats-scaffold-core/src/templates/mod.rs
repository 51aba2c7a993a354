//! Template resolution, copying, and dependency overrides
//!
//! This module provides:
//! - Template source resolution (bundled with the scripts package, or supplied by path)
//! - Recursive template copying and the readme/gitignore fix-ups
//! - The one-shot `.template.dependencies.json` override file

pub mod copier;
pub mod dependencies;

use std::path::{Path, PathBuf};

pub use copier::{copy_tree, merge_gitignore, preserve_readme, GitignoreMerge};
pub use dependencies::{take_template_dependencies, TEMPLATE_DEPENDENCIES_FILE};

/// Directory npm installs packages into
pub const NODE_MODULES: &str = "node_modules";

/// Where the template for this run comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// The template shipped inside the installed scripts package
    Bundled(PathBuf),
    /// A template path given by the caller
    Supplied(PathBuf),
}

impl TemplateSource {
    /// Template bundled in `<app>/node_modules/<package>/<template_dir>`
    pub fn bundled(app_path: &Path, package_name: &str, template_dir: &str) -> Self {
        let mut path = app_path.join(NODE_MODULES);
        // Scoped names (`@scope/name`) map onto nested directories
        for segment in package_name.split('/') {
            path.push(segment);
        }
        Self::Bundled(path.join(template_dir))
    }

    /// Caller-supplied template, resolved against the directory the user started in
    pub fn supplied(original_directory: &Path, template: &str) -> Self {
        Self::Supplied(original_directory.join(template))
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Bundled(path) | Self::Supplied(path) => path,
        }
    }

    pub fn is_supplied(&self) -> bool {
        matches!(self, Self::Supplied(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_template_path() {
        let source = TemplateSource::bundled(Path::new("/work/my-app"), "react-ats-scripts", "template");
        assert_eq!(
            source.path(),
            Path::new("/work/my-app/node_modules/react-ats-scripts/template")
        );
        assert!(!source.is_supplied());
    }

    #[test]
    fn test_scoped_package_template_path() {
        let source = TemplateSource::bundled(Path::new("/work/my-app"), "@acme/scripts", "template");
        assert_eq!(
            source.path(),
            Path::new("/work/my-app/node_modules/@acme/scripts/template")
        );
    }

    #[test]
    fn test_supplied_relative_template() {
        let source = TemplateSource::supplied(Path::new("/home/dev"), "templates/custom");
        assert_eq!(source.path(), Path::new("/home/dev/templates/custom"));
        assert!(source.is_supplied());
    }

    #[test]
    fn test_supplied_absolute_template_wins() {
        let source = TemplateSource::supplied(Path::new("/home/dev"), "/opt/templates/custom");
        assert_eq!(source.path(), Path::new("/opt/templates/custom"));
    }
}
