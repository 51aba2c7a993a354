//! Package installation passes
//!
//! Each pass is a single blocking invocation of the package manager with the
//! parent's stdio inherited, so the user sees the installer's own output.

use super::package_manager::{DependencyKind, PackageManager};
use crate::package::defaults::{CORE_DEPENDENCIES, DEV_DEPENDENCIES, PLUS_DEPENDENCIES};
use std::fmt;
use std::io;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command as TokioCommand;

/// The three installation passes, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallPass {
    /// State management, reactive streams, date utilities
    Extras,
    /// Type declarations, storybook, test renderers
    DevTooling,
    /// The UI framework runtime
    Framework,
}

impl InstallPass {
    pub fn kind(&self) -> DependencyKind {
        match self {
            InstallPass::DevTooling => DependencyKind::Dev,
            InstallPass::Extras | InstallPass::Framework => DependencyKind::Regular,
        }
    }

    /// Fixed package list for this pass
    pub fn packages(&self) -> &'static [&'static str] {
        match self {
            InstallPass::Extras => PLUS_DEPENDENCIES,
            InstallPass::DevTooling => DEV_DEPENDENCIES,
            InstallPass::Framework => CORE_DEPENDENCIES,
        }
    }
}

/// A fully built package-manager command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub pass: InstallPass,
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Build the command for `pass`, appending `extra` package specs after the fixed ones
    pub fn new(manager: PackageManager, pass: InstallPass, verbose: bool, extra: &[String]) -> Self {
        let mut args = manager.install_args(pass.kind(), verbose);
        args.extend(pass.packages().iter().map(|p| p.to_string()));
        args.extend(extra.iter().cloned());
        Self {
            pass,
            program: manager.program().to_string(),
            args,
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// A pass that could not complete; the run stops here
#[derive(Debug, Clone, Error)]
#[error("`{command}` failed")]
pub struct InstallFailure {
    pub pass: InstallPass,
    pub command: String,
    /// Exit code, or `None` if the process never started or died from a signal
    pub exit_code: Option<i32>,
}

/// Executes package-manager invocations
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run to completion and return the exit code (`None` if killed by a signal)
    async fn run(&mut self, invocation: &Invocation) -> io::Result<Option<i32>>;
}

/// Runs commands as real child processes with inherited stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&mut self, invocation: &Invocation) -> io::Result<Option<i32>> {
        // Resolve through PATH ourselves so Windows `.cmd` shims (npm.cmd, yarn.cmd) are found
        let program = which::which(&invocation.program)
            .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;

        let status = TokioCommand::new(program)
            .args(&invocation.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await?;

        Ok(status.code())
    }
}

/// Run one invocation, mapping anything but a zero exit into an [`InstallFailure`]
pub async fn run_pass<R: CommandRunner>(
    runner: &mut R,
    invocation: &Invocation,
) -> Result<(), InstallFailure> {
    tracing::info!(pass = ?invocation.pass, command = %invocation, "running installer");

    let exit_code = match runner.run(invocation).await {
        Ok(Some(0)) => return Ok(()),
        Ok(code) => code,
        Err(e) => {
            tracing::warn!(error = %e, program = %invocation.program, "installer did not start");
            None
        }
    };

    Err(InstallFailure {
        pass: invocation.pass,
        command: invocation.to_string(),
        exit_code,
    })
}
