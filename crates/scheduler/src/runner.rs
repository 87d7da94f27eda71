//! Drives one invocation through delay, arbitration and execution

use crate::command::{CommandRunner, ENV_EVENT, ENV_PATH};
use crate::error::InvocationError;
use crate::invocation::{Completion, Interference, Invocation};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{error, info, warn};
use wev_core::{resolve, Config, Disposition};

/// What the sleeping phase decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wake {
    Execute,
    Cancel,
}

/// Runs a single invocation to completion
pub struct InvocationRunner {
    invocation: Arc<Invocation>,
    inbox: mpsc::Receiver<Interference>,
    config: Arc<Config>,
    commands: Arc<dyn CommandRunner>,
}

impl InvocationRunner {
    pub fn new(
        invocation: Arc<Invocation>,
        inbox: mpsc::Receiver<Interference>,
        config: Arc<Config>,
        commands: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            invocation,
            inbox,
            config,
            commands,
        }
    }

    /// Sleep, arbitrate, execute. Fatal failures become non-zero exit codes.
    pub async fn run(mut self) -> Completion {
        let id = self.invocation.id;
        let exit_code = match self.drive().await {
            Ok(()) => 0,
            Err(e) => {
                error!("({}) {}: {}", id, self.invocation.action.name, e);
                e.exit_code()
            }
        };
        Completion { id, exit_code }
    }

    async fn drive(&mut self) -> Result<(), InvocationError> {
        if self.invocation.action.interval_ms > 0 && self.sleep().await? == Wake::Cancel {
            return Ok(());
        }
        self.execute().await
    }

    /// Wait out the interval while listening for interference.
    ///
    /// Retry loops back here with a fresh window instead of recursing.
    async fn sleep(&mut self) -> Result<Wake, InvocationError> {
        let id = self.invocation.id;
        let action = &self.invocation.action;
        let own_kind = self.invocation.kind();
        let interval = Duration::from_millis(action.interval_ms);

        loop {
            info!("({}) Sleeping {} ...", id, action.interval);
            let deadline = Instant::now() + interval;

            let incoming = tokio::select! {
                _ = sleep_until(deadline) => return Ok(Wake::Execute),
                Some(incoming) = self.inbox.recv() => incoming,
            };

            let disposition = resolve(
                &action.interval_action,
                own_kind,
                incoming.kind,
                Disposition::Ignore,
            )?;
            info!(
                "({}) {}: {} (intercepted by {})",
                id, action.name, disposition, incoming.source
            );

            match disposition {
                Disposition::Ignore => {
                    sleep_until(deadline).await;
                    return Ok(Wake::Execute);
                }
                Disposition::Retry => continue,
                Disposition::Cancel => return Ok(Wake::Cancel),
            }
        }
    }

    async fn execute(&self) -> Result<(), InvocationError> {
        let id = self.invocation.id;
        let action = &self.invocation.action;
        let notification = &self.invocation.notification;
        info!("({}) Executing {} ...", id, action.run);

        let env = vec![
            (ENV_EVENT.to_string(), notification.kind.to_string()),
            (
                ENV_PATH.to_string(),
                notification.path.to_string_lossy().into_owned(),
            ),
        ];
        let status = self
            .commands
            .run(&self.config.shell, &action.run, &env)
            .await?;

        if !status.success() {
            match status.code {
                Some(code) => warn!(
                    "({}) exit with non-zero status {}: {}",
                    id, code, action.run
                ),
                None => warn!("({}) terminated by signal: {}", id, action.run),
            }
        }
        Ok(())
    }
}
