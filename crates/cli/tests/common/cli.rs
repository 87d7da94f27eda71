//! CLI command execution helpers with automatic timing
//!
//! This module provides a wrapper around the `wev` binary that measures
//! execution time and can run it either to completion or in the background.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Output, Stdio};
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct WevCommand {
    binary_path: PathBuf,
    working_dir: PathBuf,
    args: Vec<String>,
}

impl WevCommand {
    /// Create a new command in the given working directory
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_wev")),
            working_dir: working_dir.as_ref().to_path_buf(),
            args: Vec::new(),
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.binary_path);
        command
            .args(&self.args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null());
        command
    }

    /// Execute command to completion and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();
        let output = self
            .command()
            .output()
            .context("Failed to execute command")?;
        Ok(CommandResult::from_output(output, start.elapsed()))
    }

    /// Start the command in the background
    pub fn spawn(&self) -> Result<Running> {
        let child = self
            .command()
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn command")?;
        Ok(Running {
            child: Some(child),
            started: Instant::now(),
        })
    }
}

/// A `wev` process started with [`WevCommand::spawn`]
///
/// Killed on drop if still running.
pub struct Running {
    child: Option<Child>,
    started: Instant,
}

impl Running {
    /// Wait for the process to exit on its own, up to `timeout`
    pub fn wait_timeout(&mut self, timeout: Duration) -> Result<CommandResult> {
        let deadline = Instant::now() + timeout;
        loop {
            let child = self.child.as_mut().context("process already collected")?;
            if child.try_wait()?.is_some() {
                break;
            }
            if Instant::now() >= deadline {
                anyhow::bail!("wev did not exit within {:?}", timeout);
            }
            std::thread::sleep(Duration::from_millis(20));
        }
        let child = self.child.take().context("process already collected")?;
        let output = child.wait_with_output()?;
        Ok(CommandResult::from_output(output, self.started.elapsed()))
    }

    pub fn is_running(&mut self) -> bool {
        match self.child.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    fn from_output(output: Output, duration: Duration) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration,
        }
    }

    /// Check if command succeeded
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Check if stdout contains text
    pub fn contains_stdout(&self, text: &str) -> bool {
        self.stdout.contains(text)
    }

    /// Check if stderr contains text
    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```
/// wev!(dir, "-c", "wev.toml", "--check").execute()?;
/// ```
#[macro_export]
macro_rules! wev {
    ($dir:expr, $($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::WevCommand::new($dir);
        cmd.args(&[$($arg),*]);
        cmd
    }};
}
