//! Product configuration trait for CLI binaries
//!
//! The initializer is shipped as part of a scripts package (e.g. `react-ats-scripts`).
//! This trait describes that package so the library can derive script commands and
//! locate the template bundled inside it.

/// Configuration trait for the scripts package being initialized
///
/// Implementors define:
/// - Package identity (npm name, display name)
/// - Where the bundled template lives inside the installed package
/// - Storybook settings used by the generated scripts
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// npm package name of the scripts package (also the binary invoked by `npm start`)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// Directory inside the installed scripts package that holds the starter template
    fn template_dir_name(&self) -> &'static str {
        "template"
    }

    /// Port passed to `start-storybook`
    fn storybook_port(&self) -> u16 {
        6006
    }
}
