//! Fatal CLI errors and the exit codes they map to

/// Exit codes for failures outside the scheduler
pub mod code {
    /// No directory given
    pub const NO_DIRECTORY: i32 = 3;
    /// Config could not be loaded
    pub const CONFIG: i32 = 4;
    /// Watcher could not be initialized
    pub const WATCHER_INIT: i32 = 5;
    /// Given path is missing or not a directory
    pub const NOT_A_DIRECTORY: i32 = 6;
    /// Directory could not be watched
    pub const WATCH_DIRECTORY: i32 = 7;
}

/// An error that ends the process with a specific exit code
#[derive(Debug)]
pub struct Fatal {
    pub code: i32,
    pub error: anyhow::Error,
}

impl Fatal {
    pub fn new(code: i32, error: impl Into<anyhow::Error>) -> Self {
        Self {
            code,
            error: error.into(),
        }
    }
}

/// Attach an exit code to a failed result
pub trait ExitCodeExt<T> {
    fn exit_code(self, code: i32) -> Result<T, Fatal>;
}

impl<T, E> ExitCodeExt<T> for Result<T, E>
where
    E: Into<anyhow::Error>,
{
    fn exit_code(self, code: i32) -> Result<T, Fatal> {
        self.map_err(|e| Fatal::new(code, e))
    }
}
