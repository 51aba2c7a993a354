//! ats-init - Initialize a freshly created app with react-ats-scripts

mod logging;

use anyhow::{Context, Result};
use ats_scaffold_core::{init, InitArgs, InitOutcome, ProductConfig, SystemRunner};
use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// react-ats-scripts product configuration
#[derive(Clone)]
pub struct AtsScriptsConfig;

impl ProductConfig for AtsScriptsConfig {
    fn name(&self) -> &'static str {
        "react-ats-scripts"
    }

    fn display_name(&self) -> &'static str {
        "React ATS"
    }

    fn cli_description(&self) -> &'static str {
        "Initialize a freshly created app directory with react-ats-scripts"
    }
}

#[derive(Parser, Debug)]
#[command(name = "ats-init")]
#[command(about = "Initialize a freshly created app directory with react-ats-scripts")]
#[command(version)]
pub struct Args {
    /// App directory containing the package.json to initialize
    pub app_dir: PathBuf,

    /// App name used in the report (defaults to the directory name)
    #[arg(long)]
    pub name: Option<String>,

    /// Template directory to copy instead of the one bundled with react-ats-scripts
    #[arg(short, long, env = "ATS_TEMPLATE")]
    pub template: Option<String>,

    /// Directory relative template paths are resolved against (defaults to the current directory)
    #[arg(long = "original-dir")]
    pub original_dir: Option<PathBuf>,

    /// package.json of the installed scripts package, if it was published under another name
    #[arg(long = "own-package", env = "ATS_OWN_PACKAGE")]
    pub own_package: Option<PathBuf>,

    /// Pass --verbose to npm and log each step
    #[arg(long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,
}

impl Args {
    /// Resolve paths against `cwd` and fill in defaults
    fn into_init_args(self, cwd: &Path) -> Result<InitArgs> {
        let app_path = absolute(cwd, &self.app_dir);
        let app_name = match self.name {
            Some(name) => name,
            None => app_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .with_context(|| format!("Cannot derive an app name from {}", app_path.display()))?,
        };
        let original_directory = self
            .original_dir
            .map(|dir| absolute(cwd, &dir))
            .unwrap_or_else(|| cwd.to_path_buf());

        Ok(InitArgs {
            app_path,
            app_name,
            verbose: self.verbose,
            original_directory: Some(original_directory),
            template: self.template,
            own_package: self.own_package.map(|p| absolute(cwd, &p)),
        })
    }
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = AtsScriptsConfig;

    if args.no_color {
        colored::control::set_override(false);
    }
    logging::init_logging(args.verbose, args.quiet, !args.no_color)?;

    // Children receive the same SIGINT; leave a hint that the app is half done
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!(
            "{}",
            "Interrupted. The app directory may be partially initialized.".yellow()
        );
        std::process::exit(130);
    })
    .ok();

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let init_args = args.into_init_args(&cwd)?;
    tracing::debug!(product = config.display_name(), ?init_args, "starting");

    let outcome = init(&config, &init_args, &mut SystemRunner).await?;

    Ok(match outcome {
        InitOutcome::Completed(_) => ExitCode::SUCCESS,
        InitOutcome::TemplateMissing(_) | InitOutcome::InstallFailed(_) => ExitCode::FAILURE,
    })
}
