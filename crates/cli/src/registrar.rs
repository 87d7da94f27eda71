//! Subtree registration backed by the file watcher

use std::path::Path;
use tracing::debug;
use wev_scheduler::SubtreeRegistrar;
use wev_watcher::FsWatcher;

/// Lets the dispatcher watch directories created after startup
pub struct WatcherRegistrar {
    watcher: FsWatcher,
}

impl WatcherRegistrar {
    pub fn new(watcher: FsWatcher) -> Self {
        Self { watcher }
    }
}

impl SubtreeRegistrar for WatcherRegistrar {
    fn register_subtree(&self, path: &Path) -> anyhow::Result<()> {
        let count = self.watcher.watch_tree(path)?;
        debug!("Registered {} directories under {}", count, path.display());
        Ok(())
    }
}
