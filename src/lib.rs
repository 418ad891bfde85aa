//! A bytecode interpreter with a resumable debugging core.
//!
//! [`DebugContext::run`] executes until a breakpoint, a finished step or the
//! end of the program, then returns; calling it again picks up at the next
//! instruction. Steps are decided by comparing environment-stack depth at
//! line boundaries.

pub mod config;
pub mod debugger;
pub mod error;
pub mod executor;
pub mod logging;
pub mod parser;

pub use config::LaunchConfig;
pub use debugger::{DebugContext, StepRequest, Variable};
pub use error::{DebugError, Result};
pub use executor::{Intrinsic, Stop};
