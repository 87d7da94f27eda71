//! Temporary projects for integration tests

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// A temporary directory holding a config file, a watched tree and an
/// unwatched output directory for commands to write into
pub struct TestProject {
    _temp: TempDir,
    root: PathBuf,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp = TempDir::new()?;
        let root = temp.path().canonicalize()?;
        std::fs::create_dir_all(root.join("watched"))?;
        std::fs::create_dir_all(root.join("out"))?;
        Ok(Self { _temp: temp, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory passed to `-d`
    pub fn watched(&self) -> PathBuf {
        self.root.join("watched")
    }

    /// Directory outside the watched tree
    pub fn out(&self) -> PathBuf {
        self.root.join("out")
    }

    /// Write `wev.toml` and return its path as a string
    pub fn write_config(&self, contents: &str) -> Result<String> {
        let path = self.root.join("wev.toml");
        std::fs::write(&path, contents)?;
        Ok(path.to_string_lossy().into_owned())
    }

    pub fn watched_arg(&self) -> String {
        self.watched().to_string_lossy().into_owned()
    }
}

/// Poll until `path` exists with non-empty contents
pub fn wait_for_contents(path: &Path, timeout: Duration) -> Option<String> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Ok(contents) = std::fs::read_to_string(path) {
            if !contents.is_empty() {
                return Some(contents);
            }
        }
        std::thread::sleep(Duration::from_millis(25));
    }
    None
}
