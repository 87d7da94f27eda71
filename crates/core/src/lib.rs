//! wev core - shared types for the watch-and-run scheduler
//!
//! This crate provides:
//! - Event kinds and notifications produced by the watch source
//! - Interval parsing ("500ms", "2s", "0")
//! - Interference policy resolution (ignore / retry / cancel)
//! - Configuration loading and validation

pub mod config;
pub mod error;
pub mod event;
pub mod interval;
pub mod policy;

// Re-export main types for convenience
pub use config::{Action, Config};
pub use error::{ConfigError, PolicyError};
pub use event::{EventKind, Notification, WatchMessage};
pub use interval::parse_interval_ms;
pub use policy::{resolve, Disposition, InterferenceRule, TriggerSpec};
