//! Command execution

use crate::error::LaunchError;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Environment variable carrying the triggering kind (`WRITE`, `CREATE`, ...)
pub const ENV_EVENT: &str = "WEV_EVENT";
/// Environment variable carrying the triggering path
pub const ENV_PATH: &str = "WEV_PATH";

/// How a started command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandStatus {
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
}

impl CommandStatus {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an action's command through a shell
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `shell[0] shell[1..] command` with `env` added to the environment.
    ///
    /// A command that starts and exits non-zero is an `Ok` status; only a
    /// failure to start is an error.
    async fn run(
        &self,
        shell: &[String],
        command: &str,
        env: &[(String, String)],
    ) -> Result<CommandStatus, LaunchError>;
}

/// Runs commands as child processes, logging their stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(
        &self,
        shell: &[String],
        command: &str,
        env: &[(String, String)],
    ) -> Result<CommandStatus, LaunchError> {
        let (program, args) = shell.split_first().ok_or(LaunchError::EmptyShell)?;

        let output = Command::new(program)
            .args(args)
            .arg(command)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|source| LaunchError::Spawn {
                program: program.clone(),
                source,
            })?;

        for line in String::from_utf8_lossy(&output.stdout).lines() {
            debug!("out: {}", line);
        }

        Ok(CommandStatus {
            code: output.status.code(),
        })
    }
}
