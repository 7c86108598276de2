//! Shell command execution.

pub mod command;

pub use command::{execute, quote_arg, CommandOptions, CommandResult};
