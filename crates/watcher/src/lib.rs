//! File system watching for wev
//!
//! This crate provides:
//! - A notify-backed watch source bridged into a tokio channel
//! - Translation of notify events into wev notifications
//! - Recursive registration of directory trees

pub mod error;
pub mod translate;
pub mod tree;

pub use error::WatchError;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use wev_core::WatchMessage;

/// File system watcher
///
/// Cloning yields another handle to the same underlying watcher, so the
/// dispatcher can register new subtrees while the CLI holds the original.
/// Dropping the last handle stops event delivery.
#[derive(Clone)]
pub struct FsWatcher {
    inner: Arc<Mutex<RecommendedWatcher>>,
}

impl FsWatcher {
    /// Create a watcher and the channel its notifications arrive on
    pub fn new() -> Result<(Self, mpsc::UnboundedReceiver<WatchMessage>), WatchError> {
        let (tx, rx) = mpsc::unbounded_channel();

        let watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            match res {
                Ok(event) => {
                    for notification in translate::notifications(&event) {
                        if tx.send(WatchMessage::Event(notification)).is_err() {
                            return;
                        }
                    }
                }
                Err(e) => {
                    warn!("File watch error: {}", e);
                    let _ = tx.send(WatchMessage::Error(e.to_string()));
                }
            }
        })?;

        Ok((
            Self {
                inner: Arc::new(Mutex::new(watcher)),
            },
            rx,
        ))
    }

    /// Watch a single directory (non-recursively)
    pub fn watch_dir(&self, dir: &Path) -> Result<(), WatchError> {
        self.inner
            .lock()
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::PathWatchFailed {
                path: dir.to_path_buf(),
                reason: e.to_string(),
            })?;
        debug!("Watched: {}", dir.display());
        Ok(())
    }

    /// Watch `root` and every directory below it
    ///
    /// Returns the number of directories registered.
    pub fn watch_tree(&self, root: &Path) -> Result<usize, WatchError> {
        let dirs = tree::directories_under(root)?;
        for dir in &dirs {
            self.watch_dir(dir)?;
        }
        Ok(dirs.len())
    }
}
