//! Scheduler state shared by the dispatcher and every invocation

use crate::command::CommandRunner;
use crate::exit::ExitSignal;
use crate::invocation::{Completion, Interference, Invocation};
use crate::registry::TaskRegistry;
use crate::runner::InvocationRunner;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error};
use wev_core::Config;

/// Starts watching a newly created directory tree
pub trait SubtreeRegistrar: Send + Sync {
    fn register_subtree(&self, path: &Path) -> anyhow::Result<()>;
}

/// Owns the counters, the registry and the collaborators of one scheduler.
///
/// Nothing here is process-global; independent schedulers can coexist.
pub struct SchedulerContext {
    config: Arc<Config>,
    registry: TaskRegistry,
    next_event: AtomicU64,
    exit: ExitSignal,
    commands: Arc<dyn CommandRunner>,
    registrar: Arc<dyn SubtreeRegistrar>,
}

impl SchedulerContext {
    pub fn new(
        config: Arc<Config>,
        commands: Arc<dyn CommandRunner>,
        registrar: Arc<dyn SubtreeRegistrar>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            registry: TaskRegistry::new(),
            next_event: AtomicU64::new(1),
            exit: ExitSignal::new(),
            commands,
            registrar,
        })
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn exit(&self) -> &ExitSignal {
        &self.exit
    }

    pub fn registrar(&self) -> &dyn SubtreeRegistrar {
        self.registrar.as_ref()
    }

    /// Allocate the next EventId
    pub(crate) fn next_event_id(&self) -> u64 {
        self.next_event.fetch_add(1, Ordering::SeqCst)
    }

    /// Spawn the runner for a registered invocation plus its completion observer
    pub(crate) fn launch(
        self: &Arc<Self>,
        invocation: Arc<Invocation>,
        inbox: mpsc::Receiver<Interference>,
    ) {
        let id = invocation.id;
        let (done_tx, done_rx) = oneshot::channel::<Completion>();

        let runner = InvocationRunner::new(
            invocation,
            inbox,
            Arc::clone(&self.config),
            Arc::clone(&self.commands),
        );
        tokio::spawn(async move {
            let _ = done_tx.send(runner.run().await);
        });

        let ctx = Arc::clone(self);
        tokio::spawn(async move {
            match done_rx.await {
                Ok(completion) => ctx.complete(completion),
                Err(_) => {
                    ctx.registry.remove(id);
                    error!("({}) runner stopped without reporting a result", id);
                }
            }
        });
    }

    /// Deregister, then escalate fatal exit codes
    fn complete(&self, completion: Completion) {
        self.registry.remove(completion.id);
        debug!("({}) done (exit {})", completion.id, completion.exit_code);

        if completion.exit_code != 0 && self.exit.fire(completion.exit_code) {
            error!(
                "({}) terminating with exit code {}",
                completion.id, completion.exit_code
            );
        }
    }
}
