//! Scheduler error types and the exit codes they map to

use std::path::PathBuf;
use thiserror::Error;
use wev_core::PolicyError;

/// Process exit codes produced by the scheduler
pub mod exit_code {
    /// A newly created directory could not be watched
    pub const SUBTREE_WATCH: i32 = 10;
    /// The watch source reported an error or closed
    pub const WATCH_SOURCE: i32 = 11;
    /// An interference rule could not be resolved
    pub const POLICY: i32 = 21;
    /// A command could not be started
    pub const LAUNCH: i32 = 22;
}

/// The command could not be started at all
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("shell is empty")]
    EmptyShell,

    #[error("failed to execute '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal failure of a single invocation
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("failed to resolve interference rule: {0}")]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}

impl InvocationError {
    pub fn exit_code(&self) -> i32 {
        match self {
            InvocationError::Policy(_) => exit_code::POLICY,
            InvocationError::Launch(_) => exit_code::LAUNCH,
        }
    }
}

/// Fatal failure of the dispatcher itself
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("Could not watch new directory {path}: {reason}")]
    SubtreeWatch { path: PathBuf, reason: String },

    #[error("watch error: {0}")]
    Watch(String),

    #[error("notification source closed")]
    SourceClosed,
}

impl DispatchError {
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchError::SubtreeWatch { .. } => exit_code::SUBTREE_WATCH,
            DispatchError::Watch(_) | DispatchError::SourceClosed => exit_code::WATCH_SOURCE,
        }
    }
}
