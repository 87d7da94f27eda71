//! Turns notifications into registered, running invocations

use crate::context::SchedulerContext;
use crate::error::DispatchError;
use crate::invocation::{Invocation, InvocationId};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use wev_core::{EventKind, Notification, WatchMessage};

/// Sequential consumer of the watch source
///
/// EventIds and CommandIds are assigned here, in arrival and declaration
/// order. Everything downstream runs concurrently.
pub struct EventDispatcher {
    ctx: Arc<SchedulerContext>,
}

impl EventDispatcher {
    pub fn new(ctx: Arc<SchedulerContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Arc<SchedulerContext> {
        &self.ctx
    }

    /// Schedule one invocation per action triggered by `notification`.
    ///
    /// A created directory is registered with the watcher first.
    pub fn dispatch(
        &self,
        notification: Notification,
    ) -> Result<Vec<InvocationId>, DispatchError> {
        let event = self.ctx.next_event_id();
        info!(
            "({}) event: {} {}",
            event,
            notification.kind,
            notification.path.display()
        );

        if notification.kind == EventKind::Create && notification.path.is_dir() {
            self.ctx
                .registrar()
                .register_subtree(&notification.path)
                .map_err(|e| DispatchError::SubtreeWatch {
                    path: notification.path.clone(),
                    reason: format!("{:#}", e),
                })?;
            info!("({}) Watched: {}", event, notification.path.display());
        }

        let notification = Arc::new(notification);
        let config = Arc::clone(self.ctx.config());
        let mut scheduled = Vec::new();

        for (index, action) in config.actions_on(notification.kind).enumerate() {
            let id = InvocationId::new(event, index as u32 + 1);
            let (invocation, inbox) =
                Invocation::new(id, Arc::clone(&notification), Arc::clone(action));
            let invocation = Arc::new(invocation);

            let notified = self.ctx.registry().admit(Arc::clone(&invocation));
            debug!("({}) {} scheduled, {} notified", id, action.name, notified);

            self.ctx.launch(invocation, inbox);
            scheduled.push(id);
        }

        Ok(scheduled)
    }

    /// Consume the watch source until something fatal happens.
    ///
    /// Returns the process exit code: the first fatal invocation result, or
    /// the dispatcher's own failure code.
    pub async fn run(self, mut source: mpsc::UnboundedReceiver<WatchMessage>) -> i32 {
        let exit = self.ctx.exit().clone();

        loop {
            let message = tokio::select! {
                biased;
                code = exit.wait() => return code,
                message = source.recv() => message,
            };

            let result = match message {
                Some(WatchMessage::Event(notification)) => self.dispatch(notification).map(|_| ()),
                Some(WatchMessage::Error(e)) => Err(DispatchError::Watch(e)),
                None => Err(DispatchError::SourceClosed),
            };

            if let Err(e) = result {
                error!("{}", e);
                exit.fire(e.exit_code());
                return exit.code().unwrap_or_else(|| e.exit_code());
            }
        }
    }
}
