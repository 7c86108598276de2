//! Command implementations.
//!
//! peerfill has no subcommands: [`CommandDispatcher`] decides which
//! directories to check and runs a [`CheckCommand`] for each of them.

pub mod check;
pub mod dispatcher;

pub use check::{CheckCommand, CheckOutcome, CheckStatus};
pub use dispatcher::{CommandDispatcher, CommandResult};
