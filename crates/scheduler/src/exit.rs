//! Process-wide termination signal

use std::sync::Arc;
use tokio::sync::watch;

/// First-wins exit code shared by the dispatcher and every invocation
///
/// Only the first `fire` takes effect; later codes are dropped.
#[derive(Clone, Debug)]
pub struct ExitSignal {
    tx: Arc<watch::Sender<Option<i32>>>,
}

impl ExitSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx: Arc::new(tx) }
    }

    /// Request termination with `code`. Returns false if already fired.
    pub fn fire(&self, code: i32) -> bool {
        self.tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(code);
            true
        })
    }

    pub fn code(&self) -> Option<i32> {
        *self.tx.borrow()
    }

    /// Wait until some code has been fired and return it
    pub async fn wait(&self) -> i32 {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close under us.
        let fired = rx.wait_for(Option::is_some).await.map(|code| *code);
        fired.ok().flatten().unwrap_or_default()
    }
}

impl Default for ExitSignal {
    fn default() -> Self {
        Self::new()
    }
}
