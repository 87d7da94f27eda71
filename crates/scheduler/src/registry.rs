//! Registry of in-flight invocations

use crate::invocation::{Invocation, InvocationId};
use parking_lot::RwLock;
use std::sync::Arc;

/// Live invocations, in registration order
///
/// Insert and remove take the write lock, broadcast iterates under the
/// read lock. Every entry has a runner executing or about to execute.
#[derive(Debug, Default)]
pub struct TaskRegistry {
    tasks: RwLock<Vec<Arc<Invocation>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, invocation: Arc<Invocation>) {
        let mut tasks = self.tasks.write();
        debug_assert!(tasks.iter().all(|t| t.id != invocation.id));
        tasks.push(invocation);
    }

    /// Remove the invocation with `id`, if registered
    pub fn remove(&self, id: InvocationId) -> Option<Arc<Invocation>> {
        let mut tasks = self.tasks.write();
        let index = tasks.iter().position(|t| t.id == id)?;
        Some(tasks.remove(index))
    }

    /// Offer `from` to every registered invocation of an older notification,
    /// without blocking.
    ///
    /// Returns how many inboxes accepted it. The dispatcher goes through
    /// [`admit`](Self::admit), which applies the same filter.
    pub fn broadcast(&self, from: &Invocation) -> usize {
        let tasks = self.tasks.read();
        offer_all(&tasks, from)
    }

    /// Broadcast `invocation` and register it as one step.
    ///
    /// Holding the write lock across both means no invocation can be
    /// registered between the two and miss the broadcast.
    pub fn admit(&self, invocation: Arc<Invocation>) -> usize {
        let mut tasks = self.tasks.write();
        debug_assert!(tasks.iter().all(|t| t.id != invocation.id));
        let delivered = offer_all(&tasks, &invocation);
        tasks.push(invocation);
        delivered
    }

    pub fn contains(&self, id: InvocationId) -> bool {
        self.tasks.read().iter().any(|t| t.id == id)
    }

    pub fn ids(&self) -> Vec<InvocationId> {
        self.tasks.read().iter().map(|t| t.id).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }
}

fn offer_all(tasks: &[Arc<Invocation>], from: &Invocation) -> usize {
    let message = from.interference();
    tasks
        .iter()
        .filter(|t| t.id.event != from.id.event)
        .filter(|t| t.offer(message))
        .count()
}
