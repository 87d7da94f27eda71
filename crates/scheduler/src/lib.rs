//! Debounce-and-arbitrate task scheduler
//!
//! Turns a stream of file system notifications into delayed, supervised
//! command invocations:
//!
//! ```text
//! notification -> EventDispatcher -> Invocation x N -> TaskRegistry (broadcast + register)
//!                                                   -> InvocationRunner (one task each)
//!                                                   -> completion observer (deregister)
//!                                                   -> ExitSignal (fatal codes only)
//! ```
//!
//! Sleeping invocations are told about newer ones and consult their
//! action's interference rules to ignore, retry or cancel.

pub mod command;
pub mod context;
pub mod dispatcher;
pub mod error;
pub mod exit;
pub mod invocation;
pub mod registry;
pub mod runner;


pub use command::{CommandRunner, CommandStatus, ShellRunner};
pub use context::{SchedulerContext, SubtreeRegistrar};
pub use dispatcher::EventDispatcher;
pub use error::{DispatchError, InvocationError, LaunchError};
pub use exit::ExitSignal;
pub use invocation::{Completion, Interference, Invocation, InvocationId};
pub use registry::TaskRegistry;
pub use runner::InvocationRunner;
