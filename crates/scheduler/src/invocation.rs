//! One action bound to one triggering notification

use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use wev_core::{Action, EventKind, Notification};

/// Buffered interference messages per invocation.
///
/// Senders never wait: once full, further messages are dropped.
pub const INBOX_CAPACITY: usize = 64;

/// (EventId, CommandId), shown as `event/command`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InvocationId {
    /// Process-wide notification sequence number, starting at 1
    pub event: u64,
    /// Position of the action within the event's fan-out, starting at 1
    pub command: u32,
}

impl InvocationId {
    pub fn new(event: u64, command: u32) -> Self {
        Self { event, command }
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.event, self.command)
    }
}

/// Tells a sleeping invocation that a newer one was scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interference {
    pub source: InvocationId,
    pub kind: EventKind,
}

/// A scheduled attempt to run an action in response to a notification
#[derive(Debug)]
pub struct Invocation {
    pub id: InvocationId,
    pub notification: Arc<Notification>,
    pub action: Arc<Action>,
    inbox: mpsc::Sender<Interference>,
}

impl Invocation {
    /// Create an invocation and the receiving end of its inbox
    pub fn new(
        id: InvocationId,
        notification: Arc<Notification>,
        action: Arc<Action>,
    ) -> (Self, mpsc::Receiver<Interference>) {
        let (inbox, rx) = mpsc::channel(INBOX_CAPACITY);
        (
            Self {
                id,
                notification,
                action,
                inbox,
            },
            rx,
        )
    }

    /// Kind of the triggering notification
    pub fn kind(&self) -> EventKind {
        self.notification.kind
    }

    /// The message other invocations receive about this one
    pub fn interference(&self) -> Interference {
        Interference {
            source: self.id,
            kind: self.kind(),
        }
    }

    /// Deliver without waiting. Returns false if the inbox is full or gone.
    pub fn offer(&self, interference: Interference) -> bool {
        self.inbox.try_send(interference).is_ok()
    }
}

/// Final result of an invocation, posted once by its runner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub id: InvocationId,
    pub exit_code: i32,
}
