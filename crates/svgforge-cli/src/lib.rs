// Library interface for svgforge-cli, so integration tests can reach the
// command parser and the REPL helpers.

pub mod app;
pub mod commands;

pub use commands::{handle_command, CommandResult};
