//! Watch directories and run actions until a fatal failure

use crate::exit::{code, ExitCodeExt, Fatal};
use crate::registrar::WatcherRegistrar;
use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use wev_core::Config;
use wev_scheduler::{EventDispatcher, SchedulerContext, ShellRunner};
use wev_watcher::FsWatcher;

/// Returns the exit code of the first fatal failure, or 0 on Ctrl-C
pub async fn run(config_path: &Path, directories: &[PathBuf]) -> Result<i32, Fatal> {
    if directories.is_empty() {
        return Err(Fatal::new(
            code::NO_DIRECTORY,
            anyhow!("one -d option is required at least"),
        ));
    }

    let config = Config::load(config_path)
        .with_context(|| format!("{}: Could not load config file", config_path.display()))
        .exit_code(code::CONFIG)?;
    info!(
        "Loaded {} action(s) from {}",
        config.actions.len(),
        config_path.display()
    );

    let (watcher, events) = FsWatcher::new()
        .context("Could not initialize watcher")
        .exit_code(code::WATCHER_INIT)?;

    for dir in directories {
        if !dir.is_dir() {
            return Err(Fatal::new(
                code::NOT_A_DIRECTORY,
                anyhow!(
                    "{}: given path does not exist or not a directory",
                    dir.display()
                ),
            ));
        }
    }

    let ctx = SchedulerContext::new(
        Arc::new(config),
        Arc::new(ShellRunner),
        Arc::new(WatcherRegistrar::new(watcher.clone())),
    );
    let dispatcher = EventDispatcher::new(ctx);

    for dir in directories {
        let count = watcher
            .watch_tree(dir)
            .with_context(|| format!("{}: Could not watch directory", dir.display()))
            .exit_code(code::WATCH_DIRECTORY)?;
        info!("Watching {} ({} directories)", dir.display(), count);
    }

    tokio::select! {
        exit_code = dispatcher.run(events) => Ok(exit_code),
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, shutting down");
            Ok(0)
        }
    }
}
