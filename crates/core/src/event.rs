//! File system notifications as seen by the scheduler

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Type of file system event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// File contents modified
    Write,
    /// File or directory created
    Create,
    /// File or directory deleted
    Remove,
    /// File or directory renamed
    Rename,
    /// Permissions changed
    Chmod,
}

impl EventKind {
    pub const ALL: [EventKind; 5] = [
        EventKind::Write,
        EventKind::Create,
        EventKind::Remove,
        EventKind::Rename,
        EventKind::Chmod,
    ];

    /// Name used in configuration files
    pub fn config_name(self) -> &'static str {
        match self {
            EventKind::Write => "write",
            EventKind::Create => "create",
            EventKind::Remove => "remove",
            EventKind::Rename => "rename",
            EventKind::Chmod => "chmod",
        }
    }
}

/// Exported to commands as `WEV_EVENT`, so keep it stable.
impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Write => "WRITE",
            EventKind::Create => "CREATE",
            EventKind::Remove => "REMOVE",
            EventKind::Rename => "RENAME",
            EventKind::Chmod => "CHMOD",
        };
        f.write_str(name)
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.config_name() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// A single file system change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Type of change
    pub kind: EventKind,
    /// Path that changed
    pub path: PathBuf,
}

impl Notification {
    pub fn new(kind: EventKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Item delivered by a watch source
#[derive(Debug, Clone)]
pub enum WatchMessage {
    Event(Notification),
    Error(String),
}
