//! notify events to wev notifications

use notify::event::{ModifyKind, RenameMode};
use wev_core::{EventKind, Notification};

/// Map a notify event kind onto the five kinds wev schedules on
///
/// Access events and the combined `RenameMode::Both` event are dropped;
/// the latter duplicates the separate `From`/`To` events.
pub fn kind_of(kind: &notify::EventKind) -> Option<EventKind> {
    match kind {
        notify::EventKind::Create(_) => Some(EventKind::Create),
        notify::EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => None,
        notify::EventKind::Modify(ModifyKind::Name(_)) => Some(EventKind::Rename),
        notify::EventKind::Modify(ModifyKind::Metadata(_)) => Some(EventKind::Chmod),
        notify::EventKind::Modify(_) => Some(EventKind::Write),
        notify::EventKind::Remove(_) => Some(EventKind::Remove),
        notify::EventKind::Access(_) | notify::EventKind::Any | notify::EventKind::Other => None,
    }
}

/// One notification per path carried by the event
pub fn notifications(event: &notify::Event) -> Vec<Notification> {
    match kind_of(&event.kind) {
        Some(kind) => event
            .paths
            .iter()
            .map(|path| Notification::new(kind, path.clone()))
            .collect(),
        None => Vec::new(),
    }
}
