//! ATS Scaffold Core - Shared library for initializing react-ats applications
//!
//! Given a freshly created application directory, this library rewrites its
//! `package.json`, copies a starter template into it, installs the fixed
//! dependency sets through yarn or npm, and prints the next steps.
//!
//! # Architecture
//!
//! - **Core Operations** - `package`, `templates`, `runtime`: descriptor rewrite,
//!   template copying, package manager invocation
//! - **Workflow** - `ProductConfig` trait and [`init()`] tying the steps together
//! - **Reporting** - [`Summary`] rendering of the closing message
//!
//! # Example Usage
//!
//! ```ignore
//! use ats_scaffold_core::{init, InitArgs, SystemRunner};
//!
//! let args = InitArgs {
//!     app_path: "/work/my-app".into(),
//!     app_name: "my-app".into(),
//!     original_directory: Some("/work".into()),
//!     ..Default::default()
//! };
//! let outcome = init(&MyConfig, &args, &mut SystemRunner).await?;
//! ```

pub mod init;
pub mod package;
pub mod product;
pub mod runtime;
pub mod summary;
pub mod templates;

// Re-export main types for convenience
pub use init::{init, InitArgs, InitOutcome};
pub use package::{ManifestError, PackageJson};
pub use product::ProductConfig;
pub use runtime::{CommandRunner, InstallFailure, InstallPass, Invocation, PackageManager, SystemRunner};
pub use summary::Summary;
pub use templates::{GitignoreMerge, TemplateSource};
