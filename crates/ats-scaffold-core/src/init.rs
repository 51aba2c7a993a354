//! The app initialization pipeline
//!
//! Runs strictly in order: manifest rewrite, readme preservation, template copy,
//! the three installer passes, then the success report. A missing template or a
//! failing installer pass ends the run early without an error; whatever was
//! already written stays on disk.

use crate::package::defaults::{CORE_DEPENDENCIES, DEV_DEPENDENCIES};
use crate::package::{read_package_name, PackageJson};
use crate::product::ProductConfig;
use crate::runtime::{run_pass, CommandRunner, InstallFailure, InstallPass, Invocation, PackageManager};
use crate::summary::{self, Summary};
use crate::templates::{self, TemplateSource};
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::PathBuf;

/// Arguments for initializing one app
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    /// Absolute path of the freshly created app directory
    pub app_path: PathBuf,

    /// Name the app was created with
    pub app_name: String,

    /// Pass `--verbose` through to npm
    pub verbose: bool,

    /// Directory the user ran the creator from; relative templates resolve against it
    pub original_directory: Option<PathBuf>,

    /// Template path overriding the bundled one
    pub template: Option<String>,

    /// `package.json` of the scripts package, when its installed name differs from the product's
    pub own_package: Option<PathBuf>,
}

/// How a run ended
#[derive(Debug)]
pub enum InitOutcome {
    /// Every step ran; the report was printed
    Completed(Summary),
    /// The template directory does not exist; nothing was copied or installed
    TemplateMissing(PathBuf),
    /// An installer pass failed; later passes were not attempted
    InstallFailed(InstallFailure),
}

impl InitOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, InitOutcome::Completed(_))
    }
}

/// Initialize the app described by `args`, running installers through `runner`
pub async fn init<C: ProductConfig, R: CommandRunner>(
    config: &C,
    args: &InitArgs,
    runner: &mut R,
) -> Result<InitOutcome> {
    let app_path = args.app_path.as_path();

    let own_package_name = match &args.own_package {
        Some(path) => read_package_name(path).await?,
        None => config.name().to_string(),
    };
    tracing::debug!(package = %own_package_name, app = %app_path.display(), "initializing app");

    let mut package = PackageJson::load(app_path).await?;
    let manager = PackageManager::detect(app_path).await?;
    tracing::debug!(%manager, "selected package manager");

    package.apply_defaults(config);
    package.save().await?;

    let readme_preserved = templates::preserve_readme(app_path).await?;

    let source = match &args.template {
        Some(template) => {
            let base = match &args.original_directory {
                Some(dir) => dir.clone(),
                None => std::env::current_dir().context("Failed to read current directory")?,
            };
            TemplateSource::supplied(&base, template)
        }
        None => TemplateSource::bundled(app_path, &own_package_name, config.template_dir_name()),
    };

    let template_exists = tokio::fs::try_exists(source.path())
        .await
        .with_context(|| format!("Failed to check {}", source.path().display()))?;
    if !template_exists {
        eprintln!(
            "Could not locate supplied template: {}",
            source.path().display().to_string().green()
        );
        tracing::warn!(template = %source.path().display(), "template missing, stopping");
        return Ok(InitOutcome::TemplateMissing(source.path().to_path_buf()));
    }

    let copied = templates::copy_tree(source.path(), app_path).await?;
    tracing::debug!(files = copied.len(), template = %source.path().display(), "copied template");
    let merge = templates::merge_gitignore(app_path).await?;
    tracing::debug!(?merge, "placed .gitignore");

    let program = manager.program();

    println!("Installing other dependencies {}...", program);
    println!();
    let extras = Invocation::new(manager, InstallPass::Extras, args.verbose, &[]);
    if let Err(failure) = run_pass(runner, &extras).await {
        return Ok(report_failure(failure));
    }

    println!(
        "Installing {} as dev dependencies {}...",
        DEV_DEPENDENCIES.join(", "),
        program
    );
    println!();
    let dev = Invocation::new(manager, InstallPass::DevTooling, args.verbose, &[]);
    if let Err(failure) = run_pass(runner, &dev).await {
        return Ok(report_failure(failure));
    }

    let template_dependencies = templates::take_template_dependencies(app_path).await?;

    // A supplied template wants a fresh framework install even if one is declared
    if !package.declares_all(CORE_DEPENDENCIES) || source.is_supplied() {
        println!("Installing react and react-dom using {}...", program);
        println!();
        let framework = Invocation::new(
            manager,
            InstallPass::Framework,
            args.verbose,
            &template_dependencies,
        );
        if let Err(failure) = run_pass(runner, &framework).await {
            return Ok(report_failure(failure));
        }
    } else {
        tracing::debug!("framework already declared, skipping framework pass");
    }

    let summary = Summary {
        app_name: args.app_name.clone(),
        app_path: args.app_path.clone(),
        cd_path: summary::cd_path(
            &args.app_name,
            app_path,
            args.original_directory.as_deref(),
        ),
        manager,
        readme_preserved,
    };
    print!("{}", summary);

    Ok(InitOutcome::Completed(summary))
}

fn report_failure(failure: InstallFailure) -> InitOutcome {
    eprintln!("{}", failure);
    tracing::warn!(pass = ?failure.pass, exit_code = ?failure.exit_code, "installer pass failed, stopping");
    InitOutcome::InstallFailed(failure)
}
