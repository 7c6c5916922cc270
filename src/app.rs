//! Conversion pipeline: resolve → confirm overwrite → build → run.
//!
//! `App` owns the two capabilities the pipeline needs from the outside
//! world (a confirmation source and a process runner) and never touches
//! diagnostics. Everything here blocks; one child process at a time.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::cli::Cli;
use crate::command::{self, Invocation};
use crate::error::{Error, Result};
use crate::options::{self, Confirm, ConversionOptions};

/// Pointed to whenever the external toolchain fails or cannot start.
pub const DIAGNOSTICS_HINT: &str = "run `mdpdf --diagnostics` to check pandoc, XeLaTeX and fonts";

/// Exit status of a finished child process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunStatus {
    /// `None` when the process was killed by a signal.
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn success(self) -> bool {
        self.code == Some(0)
    }
}

/// Runs the converter and waits for it.
pub trait Runner {
    fn run(&mut self, invocation: &Invocation) -> Result<RunStatus>;
}

/// Spawns the real converter with the terminal inherited, so its own
/// diagnostics reach the operator directly.
pub struct SystemRunner;

impl Runner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<RunStatus> {
        let status = Command::new(invocation.program)
            .args(&invocation.args)
            .status()
            .map_err(|source| Error::Spawn {
                program: invocation.program.to_string(),
                source,
            })?;
        Ok(RunStatus {
            code: status.code(),
        })
    }
}

/// The conversion pipeline with its injected capabilities.
pub struct App<C, R> {
    confirm: C,
    runner: R,
    /// Directory probed for local style and filter files.
    workdir: PathBuf,
}

impl<C: Confirm, R: Runner> App<C, R> {
    pub fn new(confirm: C, runner: R, workdir: impl Into<PathBuf>) -> Self {
        Self {
            confirm,
            runner,
            workdir: workdir.into(),
        }
    }

    /// Converts the file described by `cli`, returning the output path.
    ///
    /// Fails before any process is spawned on validation errors or a
    /// declined overwrite; fails after on a non-zero converter exit.
    pub fn convert(&mut self, cli: Cli) -> Result<PathBuf> {
        let options = options::resolve(cli)?;
        options::guard_overwrite(&options, &mut self.confirm)?;

        let invocation = command::build(&options, &self.workdir);
        for include in &invocation.includes {
            println!("Including local {}", include.file_name());
        }
        print_summary(&options);
        debug!(program = invocation.program, args = ?invocation.args, "running converter");

        let status = self.runner.run(&invocation)?;
        if !status.success() {
            return Err(Error::ConversionFailed { code: status.code });
        }
        info!(output = %options.output.display(), "conversion finished");
        Ok(options.output)
    }
}

/// The line printed after a successful conversion.
pub fn success_message(output: &Path) -> String {
    format!("PDF created: {}", output.display())
}

/// The suggestion attached to a pipeline error, if any.
///
/// Only failures of the external toolchain get one; usage and filesystem
/// errors already say what to fix.
pub fn failure_hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::ConversionFailed { .. } | Error::Spawn { .. } => Some(DIAGNOSTICS_HINT),
        _ => None,
    }
}

fn print_summary(options: &ConversionOptions) {
    println!("Input:    {}", options.input.display());
    println!("Output:   {}", options.output.display());
    println!("Font:     {}", options.font.describe());
    println!("Language: {}", options.lang);
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
