//! External command helpers for collectors, previewers, editors and openers.
//!
//! Command lines come from configuration as a single string and are split on
//! whitespace; quoting is not interpreted.

use std::io::{self, Write};
use std::process::{Command, Stdio};

use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use tracing::debug;

use crate::error::LazyReviewError;

/// A program name followed by its fixed arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Splits a configured command line on whitespace.
    ///
    /// Returns `None` when the line contains no program name.
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(ToOwned::to_owned);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }

    /// Program to execute.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Fixed arguments that precede any appended argument.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    fn command_with(&self, extra_arg: Option<&str>) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(arg) = extra_arg {
            command.arg(arg);
        }
        command
    }

    /// Runs the command to completion and captures its output.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Process`] when the program cannot be
    /// spawned.
    pub fn capture(&self, extra_arg: Option<&str>) -> Result<CapturedOutput, LazyReviewError> {
        debug!(program = %self.program, "running command");
        let output = self
            .command_with(extra_arg)
            .stdin(Stdio::null())
            .output()
            .map_err(|error| self.spawn_failed(&error))?;

        Ok(CapturedOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    /// Runs the command in the foreground with the terminal handed over.
    ///
    /// The alternate screen and raw mode are released while the program runs
    /// and restored afterwards, so full-screen editors can draw normally.
    ///
    /// # Errors
    ///
    /// Returns [`LazyReviewError::Process`] when the program cannot be
    /// spawned or exits unsuccessfully, or [`LazyReviewError::Tui`] when the
    /// terminal cannot be handed over.
    pub fn run_in_foreground(&self, extra_arg: &str) -> Result<(), LazyReviewError> {
        debug!(program = %self.program, arg = extra_arg, "running foreground command");
        suspend_terminal()?;
        let status = self.command_with(Some(extra_arg)).status();
        let restored = resume_terminal();

        let exit_status = status.map_err(|error| self.spawn_failed(&error))?;
        restored?;

        if exit_status.success() {
            Ok(())
        } else {
            Err(LazyReviewError::Process {
                message: format!("{} exited with {exit_status}", self.program),
            })
        }
    }

    fn spawn_failed(&self, error: &io::Error) -> LazyReviewError {
        LazyReviewError::Process {
            message: format!("failed to run {}: {error}", self.program),
        }
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    /// Whether the command exited successfully.
    pub success: bool,
    /// Standard output decoded lossily as UTF-8.
    pub stdout: String,
    /// Standard error decoded lossily as UTF-8.
    pub stderr: String,
}

fn suspend_terminal() -> Result<(), LazyReviewError> {
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).map_err(|error| terminal_error(&error))?;
    disable_raw_mode().map_err(|error| terminal_error(&error))?;
    stdout.flush().map_err(|error| terminal_error(&error))
}

fn resume_terminal() -> Result<(), LazyReviewError> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|error| terminal_error(&error))?;
    execute!(stdout, EnterAlternateScreen).map_err(|error| terminal_error(&error))
}

fn terminal_error(error: &io::Error) -> LazyReviewError {
    LazyReviewError::Tui {
        message: format!("failed to hand over the terminal: {error}"),
    }
}
