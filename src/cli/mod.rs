//! Command-line interface for peerfill.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - The per-directory check and the workspace loop

pub mod args;
pub mod commands;

pub use args::{normalize_args, Cli};
pub use commands::{CheckCommand, CheckOutcome, CheckStatus, CommandDispatcher, CommandResult};
